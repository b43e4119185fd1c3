//! Trade domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};

/// Trade direction. Quantities and prices are magnitudes; direction comes
/// only from the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// +1 for buys, -1 for sells.
    pub fn sign(&self) -> Decimal {
        match self {
            Side::Buy => Decimal::ONE,
            Side::Sell => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" | "BID" => Ok(Side::Buy),
            "SELL" | "ASK" => Ok(Side::Sell),
            _ => Err(ValidationError::UnknownSide(s.to_string())),
        }
    }
}

/// Where a trade record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeOrigin {
    /// Reported by the exchange
    Real,
    /// Manufactured from a transfer or a fee consumption
    Synthetic,
}

/// An executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Exchange-assigned identifier, opaque to the engine
    pub id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub exchange: String,
    pub symbol: String,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub fee_currency: String,
    pub time: DateTime<Utc>,
    pub origin: TradeOrigin,
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == TradeOrigin::Synthetic
    }

    /// Quantity with the side's sign applied.
    pub fn signed_quantity(&self) -> Decimal {
        self.quantity * self.side.sign()
    }

    /// Notional value in the quote currency.
    pub fn quote_quantity(&self) -> Decimal {
        self.price * self.quantity
    }

    /// Checks that the trade belongs to `symbol` and carries non-negative
    /// magnitudes with a strictly positive quantity.
    pub fn validate(&self, symbol: &str) -> Result<()> {
        if self.symbol != symbol {
            return Err(ValidationError::SymbolMismatch {
                expected: symbol.to_string(),
                actual: self.symbol.clone(),
                trade_id: self.id.clone(),
            }
            .into());
        }
        let reason = if self.quantity <= Decimal::ZERO {
            Some(format!("quantity {} must be positive", self.quantity))
        } else if self.price < Decimal::ZERO {
            Some(format!("price {} must not be negative", self.price))
        } else if self.fee < Decimal::ZERO {
            Some(format!("fee {} must not be negative", self.fee))
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ValidationError::InvalidTrade {
                trade_id: self.id.clone(),
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }
}
