//! Market data module - the daily reference price lookup used to price
//! synthetic trades.

mod daily_price_model;
mod daily_price_oracle;

#[cfg(test)]
mod daily_price_oracle_tests;

pub use daily_price_model::DailyPriceMap;
pub use daily_price_oracle::DailyPriceOracle;
