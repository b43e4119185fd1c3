use futures::StreamExt;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tradepnl_market_data::{CandleProvider, Interval, MarketDataError};

use super::DailyPriceMap;
use crate::errors::{Error, Result};
use crate::utils::time_utils::{date_from_utc, TimeRange};

/// Builds a [`DailyPriceMap`] from a provider's daily candles.
#[derive(Clone)]
pub struct DailyPriceOracle {
    provider: Arc<dyn CandleProvider>,
}

impl DailyPriceOracle {
    pub fn new(provider: Arc<dyn CandleProvider>) -> Self {
        Self { provider }
    }

    /// Drains the daily candles of `symbol` in `range` into a price map.
    ///
    /// Any error from the provider aborts the build and no map is returned.
    pub async fn build(&self, symbol: &str, range: TimeRange) -> Result<DailyPriceMap> {
        self.build_with_cancel(symbol, range, &CancellationToken::new())
            .await
    }

    /// Same as [`build`](Self::build), returning `Error::Cancelled` as soon
    /// as `cancel` fires.
    pub async fn build_with_cancel(
        &self,
        symbol: &str,
        range: TimeRange,
        cancel: &CancellationToken,
    ) -> Result<DailyPriceMap> {
        let subscribe = self
            .provider
            .subscribe_candles(symbol, Interval::OneDay, range.since, range.until);
        let subscription = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            s = subscribe => s,
        };
        let mut stream = subscription?;

        let mut prices: BTreeMap<_, Decimal> = BTreeMap::new();
        loop {
            let item = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                item = stream.next() => item,
            };
            match item {
                Some(Ok(candle)) => {
                    if !candle.is_consistent() {
                        warn!(
                            "Rejecting inconsistent daily candle for {} at {} from {}",
                            symbol,
                            candle.start_time,
                            self.provider.id()
                        );
                        return Err(MarketDataError::validation(format!(
                            "inconsistent candle for {} at {}: o={} h={} l={} c={}",
                            symbol,
                            candle.start_time,
                            candle.open,
                            candle.high,
                            candle.low,
                            candle.close
                        ))
                        .into());
                    }
                    let date = date_from_utc(candle.start_time);
                    if let Some(previous) = prices.insert(date, candle.close) {
                        warn!(
                            "Duplicate daily candle for {} on {} from {} ({} replaced by {})",
                            symbol,
                            date,
                            self.provider.id(),
                            previous,
                            candle.close
                        );
                    }
                }
                Some(Err(e)) => {
                    warn!(
                        "Daily price query for {} failed after {} candles: {}",
                        symbol,
                        prices.len(),
                        e
                    );
                    return Err(e.into());
                }
                None => break,
            }
        }

        debug!(
            "Loaded {} daily prices for {} from {}",
            prices.len(),
            symbol,
            self.provider.id()
        );
        Ok(DailyPriceMap::from_prices(symbol, prices))
    }
}
