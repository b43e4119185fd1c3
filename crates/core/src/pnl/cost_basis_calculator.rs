use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use super::{is_checkpoint, Checkpoint, EpisodeSummary, PnlReport, Position, TradeLeg};
use crate::errors::{CalculatorError, Result};
use crate::trades::{Side, Trade};

/// Splits a trade that overshoots the open quantity into a closing leg of
/// exactly `|open_quantity|` units and an opening leg with the remainder.
///
/// Fails when the trade does not flip the position: it must move against
/// `open_quantity` and exceed it in size.
pub fn split_flip(trade: &Trade, open_quantity: Decimal) -> Result<(TradeLeg, TradeLeg)> {
    let against_open = (open_quantity > Decimal::ZERO && trade.side == Side::Sell)
        || (open_quantity < Decimal::ZERO && trade.side == Side::Buy);
    let closing_quantity = open_quantity.abs();
    let opening_quantity = trade.quantity - closing_quantity;

    if !against_open || opening_quantity <= Decimal::ZERO {
        return Err(CalculatorError::Calculation(format!(
            "trade {} ({} {}) does not flip open quantity {}",
            trade.id, trade.side, trade.quantity, open_quantity
        ))
        .into());
    }

    let leg = |quantity| TradeLeg {
        trade_id: trade.id.clone(),
        side: trade.side,
        price: trade.price,
        quantity,
    };
    Ok((leg(closing_quantity), leg(opening_quantity)))
}

/// Average-cost replay over a checkpointed trade stream.
#[derive(Debug, Clone)]
pub struct AverageCostCalculator {
    symbol: String,
    fee_currency: String,
}

/// Per-currency fee totals, split between the designated currency and the
/// rest.
#[derive(Debug, Default)]
struct FeeLedger {
    trading_fee: Decimal,
    other_fees: BTreeMap<String, Decimal>,
}

impl FeeLedger {
    fn record(&mut self, trade: &Trade, fee_currency: &str) {
        if trade.fee.is_zero() {
            return;
        }
        if trade.fee_currency == fee_currency {
            self.trading_fee += trade.fee;
        } else {
            *self
                .other_fees
                .entry(trade.fee_currency.clone())
                .or_insert(Decimal::ZERO) += trade.fee;
        }
    }
}

impl AverageCostCalculator {
    pub fn new(symbol: impl Into<String>, fee_currency: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            fee_currency: fee_currency.into(),
        }
    }

    /// Replays `trades` episode by episode and builds the report.
    ///
    /// `checkpoints` must come from a [`PositionTracker`](super::PositionTracker)
    /// run over the same stream; any disagreement with the replay is an
    /// error. Fees never enter the average cost.
    pub fn calculate(
        &self,
        trades: &[Trade],
        checkpoints: &[Checkpoint],
        mark_price: Decimal,
    ) -> Result<PnlReport> {
        for trade in trades {
            trade.validate(&self.symbol)?;
        }
        if let Some(stray) = checkpoints.iter().find(|c| c.index >= trades.len()) {
            return Err(CalculatorError::CheckpointMismatch { index: stray.index }.into());
        }
        if trades.is_empty() {
            return Ok(PnlReport::empty(
                self.symbol.clone(),
                self.fee_currency.clone(),
                mark_price,
            ));
        }

        let boundaries: HashSet<usize> = checkpoints.iter().map(|c| c.index).collect();
        let mut position = Position::new(self.symbol.clone());
        let mut fees = FeeLedger::default();
        let mut episodes = Vec::with_capacity(checkpoints.len() + 1);
        let mut realized_pnl = Decimal::ZERO;
        let mut episode_pnl = Decimal::ZERO;
        let mut episode_start = 0usize;
        let mut episode_direction = trades[0].side;

        for (index, trade) in trades.iter().enumerate() {
            fees.record(trade, &self.fee_currency);

            if !position.is_open() {
                episode_direction = trade.side;
            }
            let before = position.quantity;
            let realized = self.apply(&mut position, trade)?;
            realized_pnl += realized;
            episode_pnl += realized;

            let crossed = is_checkpoint(before, position.quantity);
            if crossed != boundaries.contains(&index) {
                warn!(
                    "Checkpoint disagreement at trade {} ({}): {} -> {}",
                    index, trade.id, before, position.quantity
                );
                return Err(CalculatorError::CheckpointMismatch { index }.into());
            }
            if crossed {
                episodes.push(EpisodeSummary {
                    start_index: episode_start,
                    end_index: index,
                    direction: episode_direction,
                    realized_pnl: episode_pnl,
                    closed: true,
                });
                episode_pnl = Decimal::ZERO;
                if position.is_open() {
                    // The flipping trade's opening leg starts the next episode.
                    episode_start = index;
                    episode_direction = trade.side;
                } else {
                    episode_start = index + 1;
                }
            }
        }

        if episode_start < trades.len() {
            episodes.push(EpisodeSummary {
                start_index: episode_start,
                end_index: trades.len() - 1,
                direction: episode_direction,
                realized_pnl: episode_pnl,
                closed: false,
            });
        }

        let unrealized_pnl = (mark_price - position.average_cost) * position.quantity;

        debug!(
            "{}: {} trades, {} episodes, quantity {}, average cost {}, realized {}",
            self.symbol,
            trades.len(),
            episodes.len(),
            position.quantity,
            position.average_cost,
            realized_pnl
        );

        Ok(PnlReport {
            symbol: self.symbol.clone(),
            trade_count: trades.len(),
            quantity: position.quantity,
            average_cost: position.average_cost,
            realized_pnl,
            unrealized_pnl,
            mark_price,
            fee_currency: self.fee_currency.clone(),
            trading_fee: fees.trading_fee,
            other_fees: fees.other_fees,
            checkpoints: checkpoints.to_vec(),
            episodes,
        })
    }

    /// Applies one trade to the position and returns the PnL it realizes.
    fn apply(&self, position: &mut Position, trade: &Trade) -> Result<Decimal> {
        let open = position.quantity;
        let increases = open.is_zero()
            || (open > Decimal::ZERO && trade.side == Side::Buy)
            || (open < Decimal::ZERO && trade.side == Side::Sell);

        if increases {
            let open_size = open.abs();
            position.average_cost = (position.average_cost * open_size
                + trade.price * trade.quantity)
                / (open_size + trade.quantity);
            position.quantity += trade.signed_quantity();
            return Ok(Decimal::ZERO);
        }

        let open_sign = if open > Decimal::ZERO {
            Decimal::ONE
        } else {
            Decimal::NEGATIVE_ONE
        };
        if trade.quantity <= open.abs() {
            let realized = (trade.price - position.average_cost) * trade.quantity * open_sign;
            position.quantity += trade.signed_quantity();
            if !position.is_open() {
                position.reset();
            }
            return Ok(realized);
        }

        let (closing, opening) = split_flip(trade, open)?;
        let realized = (closing.price - position.average_cost) * closing.quantity * open_sign;
        debug!(
            "Trade {} flips {}: closes {} and opens {} at {}",
            trade.id, open, closing.quantity, opening.quantity, opening.price
        );
        position.quantity = opening.quantity * opening.side.sign();
        position.average_cost = opening.price;
        Ok(realized)
    }
}
