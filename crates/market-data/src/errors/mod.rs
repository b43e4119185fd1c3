//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while pulling candles from a provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// A provider-specific failure (transport, authentication, decoding).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a candle that breaks basic invariants.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// The subscription was cancelled before the stream was drained.
    #[error("Candle subscription cancelled")]
    Cancelled,
}

impl MarketDataError {
    /// Shorthand for a candle that breaks basic invariants.
    pub fn validation(message: impl Into<String>) -> Self {
        MarketDataError::ValidationFailed {
            message: message.into(),
        }
    }

    /// Shorthand for a provider failure.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        MarketDataError::ProviderError {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let error = MarketDataError::provider("BINANCE", "HTTP 502");
        assert_eq!(error.to_string(), "Provider error: BINANCE - HTTP 502");
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(
            MarketDataError::Cancelled.to_string(),
            "Candle subscription cancelled"
        );
    }
}
