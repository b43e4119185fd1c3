//! Trades module - trade records, the trade source boundary, and the
//! chronological merge of real and synthetic trades.

mod fee_converter;
mod trade_merge;
mod trades_model;
mod trades_traits;



pub use fee_converter::FeeConsumptionConverter;
pub use trade_merge::merge_trades;
pub use trades_model::{Side, Trade, TradeOrigin};
pub use trades_traits::{QueryTradesOptions, TradeSourceTrait};
