//! Transfer domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferKind {
    Deposit,
    Withdrawal,
}

/// Transfer lifecycle. Only confirmed transfers change holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

/// How deposits are costed when turned into synthetic buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositCostPolicy {
    /// Deposit is acquired at the daily reference price
    #[default]
    AcquisitionCost,
    /// Deposit is treated as a gift or airdrop and enters at zero cost
    ZeroCost,
}

impl FromStr for DepositCostPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACQUISITION_COST" => Ok(DepositCostPolicy::AcquisitionCost),
            "ZERO_COST" => Ok(DepositCostPolicy::ZeroCost),
            _ => Err(format!("Unknown deposit cost policy: {}", s)),
        }
    }
}

/// A deposit or withdrawal of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Transaction id as reported by the exchange
    pub id: String,
    #[serde(default)]
    pub exchange: String,
    pub kind: TransferKind,
    pub asset: String,
    pub amount: Decimal,
    /// Network fee, in `asset`
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    /// Effective time: confirmation for deposits, apply time for withdrawals
    pub time: DateTime<Utc>,
    pub status: TransferStatus,
    /// Trade price reported by the source, when it reports one
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl Transfer {
    pub fn is_confirmed(&self) -> bool {
        self.status == TransferStatus::Confirmed
    }
}
