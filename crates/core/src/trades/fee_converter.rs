use log::debug;
use rust_decimal::Decimal;

use super::{Side, Trade, TradeOrigin};
use crate::constants::SYNTHETIC_FEE_PREFIX;
use crate::errors::Result;
use crate::market_data::DailyPriceMap;

/// Turns fees paid in the exchange's fee currency on other markets into
/// synthetic sells of the fee-currency symbol.
///
/// Only meaningful when the configured symbol's base asset is the fee
/// currency (e.g. `BNBUSDT` with fee currency `BNB`): every fee paid in BNB
/// on another market reduces the BNB position.
#[derive(Debug, Clone)]
pub struct FeeConsumptionConverter {
    symbol: String,
    fee_currency: String,
}

impl FeeConsumptionConverter {
    pub fn new(symbol: impl Into<String>, fee_currency: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            fee_currency: fee_currency.into(),
        }
    }

    /// Keeps trades of the configured symbol, converts foreign trades that
    /// paid a fee in the fee currency, and drops the rest.
    ///
    /// Converted trades are priced from `prices`; a missing date fails the
    /// whole batch.
    pub fn convert(&self, trades: Vec<Trade>, prices: &DailyPriceMap) -> Result<Vec<Trade>> {
        let total = trades.len();
        let mut converted = Vec::with_capacity(total);
        let mut consumed = 0usize;

        for trade in trades {
            if trade.symbol == self.symbol {
                converted.push(trade);
                continue;
            }
            if trade.fee_currency != self.fee_currency || trade.fee <= Decimal::ZERO {
                continue;
            }
            let price = prices.require(&self.fee_currency, trade.time)?;
            converted.push(Trade {
                id: format!("{}-{}", SYNTHETIC_FEE_PREFIX, trade.id),
                order_id: trade.order_id,
                exchange: trade.exchange,
                symbol: self.symbol.clone(),
                side: Side::Sell,
                price,
                quantity: trade.fee,
                fee: Decimal::ZERO,
                fee_currency: self.fee_currency.clone(),
                time: trade.time,
                origin: TradeOrigin::Synthetic,
            });
            consumed += 1;
        }

        debug!(
            "Fee consumption: {} of {} trades converted into {} sells",
            consumed, total, self.symbol
        );
        Ok(converted)
    }
}
