//! PnL module - position tracking, average-cost replay and reports.

mod cost_basis_calculator;
mod pnl_model;
mod pnl_service;
mod position_tracker;




pub use cost_basis_calculator::{split_flip, AverageCostCalculator};
pub use pnl_model::{
    is_checkpoint, Checkpoint, EpisodeSummary, PnlReport, Position, TrackerResult, TradeLeg,
};
pub use pnl_service::{PnlRequest, PnlService, PnlServiceTrait};
pub use position_tracker::PositionTracker;
