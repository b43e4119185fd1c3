use log::debug;

use super::{is_checkpoint, Checkpoint, Position, TrackerResult};
use crate::errors::Result;
use crate::trades::Trade;

/// Follows the signed net quantity of one symbol through a time-ordered
/// trade stream and records checkpoints where it crosses or lands on zero.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    symbol: String,
}

impl PositionTracker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Replays `trades` in order. Every trade is validated before any state
    /// changes, so an invalid trade anywhere yields an error and nothing else.
    pub fn track(&self, trades: &[Trade]) -> Result<TrackerResult> {
        for trade in trades {
            trade.validate(&self.symbol)?;
        }

        let mut position = Position::new(self.symbol.clone());
        let mut checkpoints = Vec::new();

        for (index, trade) in trades.iter().enumerate() {
            let before = position.quantity;
            position.quantity += trade.signed_quantity();

            if is_checkpoint(before, position.quantity) {
                debug!(
                    "Checkpoint at trade {} ({}): {} -> {}",
                    index, trade.id, before, position.quantity
                );
                checkpoints.push(Checkpoint {
                    index,
                    trade_id: trade.id.clone(),
                    quantity_before: before,
                    quantity_after: position.quantity,
                });
            }
        }

        Ok(TrackerResult {
            checkpoints,
            quantity: position.quantity,
        })
    }
}
