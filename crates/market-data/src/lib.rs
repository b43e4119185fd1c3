//! Tradepnl Market Data Crate
//!
//! This crate describes the boundary between the accounting engine and
//! whatever supplies historical candles (an exchange REST client, a local
//! cache, a fixture in tests).
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  CandleProvider  | --> |  CandleStream    | --> |  consumer        |
//! |  (exchange, ...) |     |  Result<Candle>  |     |  (price oracle)  |
//! +------------------+     +------------------+     +------------------+
//! ```
//!
//! A candle stream is finite. It yields candles in ascending start time and
//! terminates either by running out of items or by yielding one error.
//! Consumers must treat the first error as terminal for the whole query.
//!
//! # Core Types
//!
//! - [`Candle`] - OHLCV bar with a start time
//! - [`Interval`] - Candle width (the engine only asks for daily bars)
//! - [`CandleProvider`] - Trait implemented by candle sources
//! - [`StaticCandleProvider`] - In-memory provider over pre-fetched candles

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{Candle, Interval, Symbol};
pub use provider::{CandleProvider, CandleStream, StaticCandleProvider};
