use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Converts a UTC instant to its calendar date.
///
/// Daily prices and transfers are matched on this date. UTC is the only
/// timezone used for date keys.
pub fn date_from_utc(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Half-open query window `[since, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self { since, until }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.since && instant < self.until
    }

    pub fn is_empty(&self) -> bool {
        self.since >= self.until
    }

    /// Same window with `since` moved back to the start of its UTC day, so
    /// the daily candle of the first date falls inside it.
    pub fn to_day_start(&self) -> Self {
        let midnight = date_from_utc(self.since).and_time(NaiveTime::default());
        Self {
            since: Utc.from_utc_datetime(&midnight),
            until: self.until,
        }
    }
}
