use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::debug;

use super::traits::{CandleProvider, CandleStream};
use crate::errors::MarketDataError;
use crate::models::{Candle, Interval};

/// Serves candles from memory.
///
/// Useful when candles were fetched ahead of time (or recorded) and in tests.
/// A failure can be injected after a number of candles to exercise consumers'
/// all-or-nothing handling.
#[derive(Clone, Debug, Default)]
pub struct StaticCandleProvider {
    candles: Vec<Candle>,
    failure: Option<(usize, MarketDataError)>,
}

impl StaticCandleProvider {
    pub fn new(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.start_time);
        Self {
            candles,
            failure: None,
        }
    }

    /// Terminates every subscription with `error` after `after` candles.
    pub fn with_failure_after(mut self, after: usize, error: MarketDataError) -> Self {
        self.failure = Some((after, error));
        self
    }
}

#[async_trait]
impl CandleProvider for StaticCandleProvider {
    fn id(&self) -> &'static str {
        "STATIC"
    }

    async fn subscribe_candles(
        &self,
        symbol: &str,
        interval: Interval,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<CandleStream, MarketDataError> {
        let mut items: Vec<Result<Candle, MarketDataError>> = self
            .candles
            .iter()
            .filter(|c| {
                &*c.symbol == symbol
                    && c.interval == interval
                    && c.start_time >= since
                    && c.start_time < until
            })
            .cloned()
            .map(Ok)
            .collect();

        if let Some((after, error)) = &self.failure {
            items.truncate(*after);
            items.push(Err(error.clone()));
        }

        debug!(
            "Static provider serving {} items for {} {} [{}, {})",
            items.len(),
            symbol,
            interval,
            since,
            until
        );

        Ok(stream::iter(items).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use futures::TryStreamExt;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, d, 0, 0, 0).unwrap()
    }

    fn provider() -> StaticCandleProvider {
        StaticCandleProvider::new(vec![
            Candle::from_close("BTCUSDT", Interval::OneDay, day(3), dec!(52000)),
            Candle::from_close("BTCUSDT", Interval::OneDay, day(1), dec!(50000)),
            Candle::from_close("BTCUSDT", Interval::OneDay, day(2), dec!(51000)),
            Candle::from_close("ETHUSDT", Interval::OneDay, day(1), dec!(1500)),
        ])
    }

    #[tokio::test]
    async fn test_window_is_half_open_and_sorted() {
        let stream = provider()
            .subscribe_candles("BTCUSDT", Interval::OneDay, day(1), day(3))
            .await
            .unwrap();
        let candles: Vec<Candle> = stream.try_collect().await.unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, dec!(50000));
        assert_eq!(candles[1].close, dec!(51000));
    }

    #[tokio::test]
    async fn test_injected_failure_is_last_item() {
        let stream = provider()
            .with_failure_after(1, MarketDataError::provider("STATIC", "boom"))
            .subscribe_candles("BTCUSDT", Interval::OneDay, day(1), day(4))
            .await
            .unwrap();
        let items: Vec<_> = stream.collect().await;

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }
}
