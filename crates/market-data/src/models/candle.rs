use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::Symbol;

/// Candle width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One OHLCV bar.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub symbol: Symbol,
    pub interval: Interval,

    /// Start of the bar (inclusive)
    pub start_time: DateTime<Utc>,

    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,

    /// Closing price, used as the bar's reference price
    pub close: Decimal,

    /// Traded base volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
}

impl Candle {
    /// Builds a candle where only the close is known.
    pub fn from_close(
        symbol: impl Into<Symbol>,
        interval: Interval,
        start_time: DateTime<Utc>,
        close: Decimal,
    ) -> Self {
        Candle {
            symbol: symbol.into(),
            interval,
            start_time,
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }

    /// Checks the OHLC ordering invariants.
    pub fn is_consistent(&self) -> bool {
        !self.close.is_sign_negative()
            && self.low <= self.high
            && self.low <= self.open
            && self.low <= self.close
            && self.high >= self.open
            && self.high >= self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_close_is_consistent() {
        let candle = Candle::from_close(
            "BTCUSDT",
            Interval::OneDay,
            Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap(),
            dec!(50000),
        );
        assert!(candle.is_consistent());
        assert_eq!(candle.open, dec!(50000));
    }

    #[test]
    fn test_inverted_high_low_is_inconsistent() {
        let mut candle = Candle::from_close(
            "BTCUSDT",
            Interval::OneDay,
            Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap(),
            dec!(100),
        );
        candle.high = dec!(90);
        assert!(!candle.is_consistent());
    }

    #[test]
    fn test_candle_deserializes_from_json() {
        let candle: Candle = serde_json::from_str(
            r#"{
                "symbol": "BTCUSDT",
                "interval": "1d",
                "startTime": "2021-03-01T00:00:00Z",
                "open": 49000,
                "high": 51000,
                "low": 48000,
                "close": 50000
            }"#,
        )
        .unwrap();

        assert_eq!(&*candle.symbol, "BTCUSDT");
        assert_eq!(candle.interval, Interval::OneDay);
        assert_eq!(candle.close, dec!(50000));
        assert!(candle.volume.is_none());
        assert!(candle.is_consistent());
    }

    #[test]
    fn test_interval_serialization() {
        let json = serde_json::to_string(&Interval::OneDay).unwrap();
        assert_eq!(json, r#""1d""#);
    }
}
