//! Trade source traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Trade;
use crate::constants::DEFAULT_TRADE_LIMIT;
use crate::errors::Result;
use crate::utils::time_utils::TimeRange;

/// Options for a trade history query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTradesOptions {
    pub symbol: String,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl QueryTradesOptions {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            since: None,
            until: None,
            limit: DEFAULT_TRADE_LIMIT,
        }
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.since = Some(range.since);
        self.until = Some(range.until);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Exchange collaborator that returns trade history.
///
/// Each call is atomic: all rows for the query, or one error. Pagination
/// and retries happen inside the implementation.
#[async_trait]
pub trait TradeSourceTrait: Send + Sync {
    /// Trades of one symbol, oldest first.
    async fn query_trades(&self, options: &QueryTradesOptions) -> Result<Vec<Trade>>;

    /// Trades of any symbol whose fee was paid in `fee_currency`, plus all
    /// trades of `symbol`, oldest first.
    async fn query_trades_for_fee_currency(
        &self,
        symbol: &str,
        fee_currency: &str,
        range: TimeRange,
    ) -> Result<Vec<Trade>>;
}
