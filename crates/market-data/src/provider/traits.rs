//! Candle provider trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

use crate::errors::MarketDataError;
use crate::models::{Candle, Interval};

/// Finite candle sequence. The first `Err` item is terminal.
pub type CandleStream = BoxStream<'static, Result<Candle, MarketDataError>>;

/// Trait for candle sources.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tradepnl_market_data::{CandleProvider, CandleStream, Interval, MarketDataError};
///
/// struct ExchangeKLines {
///     client: RestClient,
/// }
///
/// #[async_trait]
/// impl CandleProvider for ExchangeKLines {
///     fn id(&self) -> &'static str {
///         "EXCHANGE"
///     }
///
///     async fn subscribe_candles(
///         &self,
///         symbol: &str,
///         interval: Interval,
///         since: DateTime<Utc>,
///         until: DateTime<Utc>,
///     ) -> Result<CandleStream, MarketDataError> {
///         // page through the REST endpoint and yield candles in order
///     }
/// }
/// ```
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Opens a candle subscription for `[since, until)`.
    ///
    /// Candles must be yielded in ascending `start_time`. Setup failures are
    /// returned directly; failures after setup are yielded as the last item
    /// of the stream.
    async fn subscribe_candles(
        &self,
        symbol: &str,
        interval: Interval,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<CandleStream, MarketDataError>;
}
