//! Tradepnl Core - average-cost position and PnL accounting.
//!
//! This crate replays a chronological ledger of exchange trades (plus
//! deposits and withdrawals turned into synthetic trades) and reports the
//! open quantity, its average cost, realized PnL and unrealized PnL at a
//! mark price. Exchange clients are reached through the traits in
//! [`trades`] and [`transfers`], and candles through
//! `tradepnl_market_data::CandleProvider`.

pub mod constants;
pub mod errors;
pub mod market_data;
pub mod pnl;
pub mod settings;
pub mod trades;
pub mod transfers;
pub mod utils;

pub use pnl::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
