//! Candle provider abstractions.
//!
//! This module contains:
//! - The `CandleProvider` trait that all candle sources implement
//! - `StaticCandleProvider`, an in-memory source over pre-fetched candles
//!
//! Pagination and retries belong to concrete providers. From the caller's
//! perspective one subscription is atomic: every candle of the window, or a
//! single terminal error.

mod static_provider;
mod traits;

pub use static_provider::StaticCandleProvider;
pub use traits::{CandleProvider, CandleStream};
