use std::sync::Arc;

/// Exchange symbol (e.g. "BTCUSDT"), shared across candles of one query
pub type Symbol = Arc<str>;
