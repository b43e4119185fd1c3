//! Market data models
//!
//! - `types` - Type aliases for common identifiers
//! - `candle` - OHLCV candle and interval

mod candle;
mod types;

pub use candle::{Candle, Interval};
pub use types::Symbol;
