//! Settings module - configuration for one PnL computation.

mod settings_model;


pub use settings_model::*;
