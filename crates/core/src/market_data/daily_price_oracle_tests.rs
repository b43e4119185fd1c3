#[cfg(test)]
mod tests {
    use crate::errors::{DataSourceError, Error};
    use crate::market_data::{DailyPriceMap, DailyPriceOracle};
    use crate::utils::time_utils::TimeRange;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;
    use tradepnl_market_data::{Candle, Interval, MarketDataError, StaticCandleProvider};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, day, hour, 0, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
    }

    fn march() -> TimeRange {
        TimeRange::new(at(1, 0), at(31, 0))
    }

    fn candles() -> Vec<Candle> {
        vec![
            Candle::from_close("BTCUSDT", Interval::OneDay, at(1, 0), dec!(50000)),
            Candle::from_close("BTCUSDT", Interval::OneDay, at(2, 0), dec!(51000)),
            Candle::from_close("BTCUSDT", Interval::OneDay, at(3, 0), dec!(49500)),
        ]
    }

    #[tokio::test]
    async fn test_build_maps_dates_to_close() {
        let oracle = DailyPriceOracle::new(Arc::new(StaticCandleProvider::new(candles())));
        let prices = oracle.build("BTCUSDT", march()).await.unwrap();

        assert_eq!(prices.len(), 3);
        assert_eq!(prices.symbol(), "BTCUSDT");
        assert_eq!(prices.get(date(1)), Some(dec!(50000)));
        assert_eq!(prices.get(date(3)), Some(dec!(49500)));
        assert_eq!(prices.get(date(4)), None);
        assert_eq!(prices.first_date(), Some(date(1)));
        assert_eq!(prices.last_date(), Some(date(3)));
    }

    #[tokio::test]
    async fn test_duplicate_dates_keep_last_seen() {
        let mut data = candles();
        data.push(Candle::from_close(
            "BTCUSDT",
            Interval::OneDay,
            at(2, 12),
            dec!(52000),
        ));
        let oracle = DailyPriceOracle::new(Arc::new(StaticCandleProvider::new(data)));
        let prices = oracle.build("BTCUSDT", march()).await.unwrap();

        assert_eq!(prices.len(), 3);
        assert_eq!(prices.get(date(2)), Some(dec!(52000)));
    }

    #[tokio::test]
    async fn test_source_error_returns_no_partial_map() {
        let provider = StaticCandleProvider::new(candles())
            .with_failure_after(2, MarketDataError::provider("STATIC", "connection reset"));
        let oracle = DailyPriceOracle::new(Arc::new(provider));

        let result = oracle.build("BTCUSDT", march()).await;
        assert!(matches!(
            result,
            Err(Error::DataSource(DataSourceError::MarketData(
                MarketDataError::ProviderError { .. }
            )))
        ));
    }

    #[tokio::test]
    async fn test_inconsistent_candle_aborts_build() {
        let mut data = candles();
        data.push(Candle::from_close(
            "BTCUSDT",
            Interval::OneDay,
            at(4, 0),
            dec!(-1),
        ));
        let oracle = DailyPriceOracle::new(Arc::new(StaticCandleProvider::new(data)));

        let result = oracle.build("BTCUSDT", march()).await;
        assert!(matches!(
            result,
            Err(Error::DataSource(DataSourceError::MarketData(
                MarketDataError::ValidationFailed { .. }
            )))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_drain() {
        let oracle = DailyPriceOracle::new(Arc::new(StaticCandleProvider::new(candles())));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = oracle.build_with_cancel("BTCUSDT", march(), &cancel).await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn test_empty_window_yields_empty_map() {
        let oracle = DailyPriceOracle::new(Arc::new(StaticCandleProvider::new(candles())));
        let prices = oracle
            .build("BTCUSDT", TimeRange::new(at(10, 0), at(20, 0)))
            .await
            .unwrap();
        assert!(prices.is_empty());
    }

    #[test]
    fn test_require_reports_missing_date() {
        let prices = DailyPriceMap::from_prices("BTCUSDT", vec![(date(1), dec!(50000))]);

        assert_eq!(prices.require("BTC", at(1, 18)).unwrap(), dec!(50000));
        match prices.require("BTC", at(2, 1)) {
            Err(Error::PricingUnavailable { asset, date: d }) => {
                assert_eq!(asset, "BTC");
                assert_eq!(d, date(2));
            }
            other => panic!("expected PricingUnavailable, got {:?}", other),
        }
    }
}
