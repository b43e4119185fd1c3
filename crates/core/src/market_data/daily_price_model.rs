use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Error, Result};
use crate::utils::time_utils::date_from_utc;

/// Date -> reference (closing) price for one symbol.
///
/// Dates are UTC calendar dates. The map is built once per query window and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPriceMap {
    symbol: String,
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl DailyPriceMap {
    /// Builds a map from `(date, price)` pairs. Later duplicates win.
    pub fn from_prices<I>(symbol: impl Into<String>, prices: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Decimal)>,
    {
        Self {
            symbol: symbol.into(),
            prices: prices.into_iter().collect(),
        }
    }

    /// Map with no prices, for computations that never price a trade.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            prices: BTreeMap::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn get(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.get(&date).copied()
    }

    /// Price for the UTC date of `instant`, or `PricingUnavailable`.
    pub fn require(&self, asset: &str, instant: DateTime<Utc>) -> Result<Decimal> {
        let date = date_from_utc(instant);
        self.get(date).ok_or_else(|| Error::PricingUnavailable {
            asset: asset.to_string(),
            date,
        })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next_back().copied()
    }
}
