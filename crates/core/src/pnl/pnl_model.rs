use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::trades::Side;

/// True when moving from `before` to `after` crosses zero or lands on it
/// from a nonzero quantity.
pub fn is_checkpoint(before: Decimal, after: Decimal) -> bool {
    if before.is_zero() {
        return false;
    }
    after.is_zero()
        || (before > Decimal::ZERO && after < Decimal::ZERO)
        || (before < Decimal::ZERO && after > Decimal::ZERO)
}

/// Running state of one symbol during a replay.
///
/// A fresh position is created for every computation and dropped with it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    /// Signed net quantity: positive long, negative short
    pub quantity: Decimal,
    /// Average cost of the open quantity in the current episode
    pub average_cost: Decimal,
}

impl Position {
    pub fn new(symbol: impl Into<String>) -> Self {
        Position {
            symbol: symbol.into(),
            quantity: Decimal::ZERO,
            average_cost: Decimal::ZERO,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.quantity.is_zero()
    }

    /// Clears the episode state.
    pub fn reset(&mut self) {
        self.quantity = Decimal::ZERO;
        self.average_cost = Decimal::ZERO;
    }
}

/// A trade whose application crosses zero or lands on zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Index of the trade in the merged stream
    pub index: usize,
    pub trade_id: String,
    pub quantity_before: Decimal,
    pub quantity_after: Decimal,
}

impl Checkpoint {
    /// The trade flipped direction instead of just flattening.
    pub fn is_flip(&self) -> bool {
        !self.quantity_after.is_zero()
    }
}

/// Output of [`PositionTracker::track`](super::PositionTracker::track).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerResult {
    pub checkpoints: Vec<Checkpoint>,
    pub quantity: Decimal,
}

/// One side of a flipping trade.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeLeg {
    pub trade_id: String,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
}

/// PnL realized within one episode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    /// First trade index of the episode (a flipping trade opens the next one)
    pub start_index: usize,
    /// Last trade index of the episode
    pub end_index: usize,
    /// Long for buys, short for sells
    pub direction: Side,
    pub realized_pnl: Decimal,
    /// The episode returned to flat (or flipped) before the stream ended
    pub closed: bool,
}

/// Result of an average-cost computation. Built once, never updated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PnlReport {
    pub symbol: String,
    pub trade_count: usize,
    /// Final signed open quantity
    pub quantity: Decimal,
    pub average_cost: Decimal,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub mark_price: Decimal,
    /// The designated fee currency
    pub fee_currency: String,
    /// Fees paid in the designated fee currency
    pub trading_fee: Decimal,
    /// Fees paid in any other currency, for information only
    pub other_fees: BTreeMap<String, Decimal>,
    pub checkpoints: Vec<Checkpoint>,
    pub episodes: Vec<EpisodeSummary>,
}

impl PnlReport {
    /// Zero-valued report for an empty trade stream.
    pub fn empty(
        symbol: impl Into<String>,
        fee_currency: impl Into<String>,
        mark_price: Decimal,
    ) -> Self {
        PnlReport {
            symbol: symbol.into(),
            trade_count: 0,
            quantity: Decimal::ZERO,
            average_cost: Decimal::ZERO,
            realized_pnl: Decimal::ZERO,
            unrealized_pnl: Decimal::ZERO,
            mark_price,
            fee_currency: fee_currency.into(),
            trading_fee: Decimal::ZERO,
            other_fees: BTreeMap::new(),
            checkpoints: Vec::new(),
            episodes: Vec::new(),
        }
    }

    /// Realized PnL less fees paid in the designated fee currency. Only
    /// meaningful when the fee currency is the quote currency.
    pub fn net_realized_pnl(&self) -> Decimal {
        self.realized_pnl - self.trading_fee
    }

    /// Every fee total keyed by currency.
    pub fn fees_by_currency(&self) -> BTreeMap<String, Decimal> {
        let mut fees = self.other_fees.clone();
        if !self.trading_fee.is_zero() {
            *fees
                .entry(self.fee_currency.clone())
                .or_insert(Decimal::ZERO) += self.trading_fee;
        }
        fees
    }
}
