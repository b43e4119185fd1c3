//! Core error types for the accounting engine.
//!
//! Collaborator failures (exchange clients, candle providers) are converted
//! into [`DataSourceError`] at the boundary so callers see one error type.

use chrono::NaiveDate;
use thiserror::Error;
use tradepnl_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for a PnL computation.
///
/// Every variant aborts the computation. No partial report is ever returned
/// alongside an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Data source query failed: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("No daily price for {asset} on {date}")]
    PricingUnavailable { asset: String, date: NaiveDate },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("PnL calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Computation cancelled")]
    Cancelled,
}

/// A collaborator query failed.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Trade history query failed: {0}")]
    Trades(String),

    #[error("Transfer history query failed: {0}")]
    Transfers(String),

    #[error("Candle query failed: {0}")]
    MarketData(#[from] MarketDataError),
}

/// Validation errors for trades and user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Trade {trade_id} has symbol {actual}, expected {expected}")]
    SymbolMismatch {
        expected: String,
        actual: String,
        trade_id: String,
    },

    #[error("Unknown trade side: {0}")]
    UnknownSide(String),

    #[error("Invalid trade {trade_id}: {reason}")]
    InvalidTrade { trade_id: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

/// Errors raised by the replay itself.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Checkpoint list disagrees with replay at trade index {index}")]
    CheckpointMismatch { index: usize },

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

// === From implementations for common error types ===

impl From<MarketDataError> for Error {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::Cancelled => Error::Cancelled,
            other => Error::DataSource(DataSourceError::MarketData(other)),
        }
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
