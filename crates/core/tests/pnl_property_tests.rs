//! Property-based integration tests for position tracking and average-cost
//! replay.
//!
//! These tests verify that universal properties hold across random trade
//! streams, using the `proptest` crate for random test case generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tradepnl_core::trades::{Side, Trade, TradeOrigin};
use tradepnl_core::{split_flip, AverageCostCalculator, PnlReport, PositionTracker};

const SYMBOL: &str = "BTCUSDT";

// =============================================================================
// Generators
// =============================================================================

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
}

fn build_trade(
    index: usize,
    side: Side,
    quantity: Decimal,
    price: Decimal,
    fee: Decimal,
) -> Trade {
    Trade {
        id: format!("T{}", index),
        order_id: None,
        exchange: "binance".to_string(),
        symbol: SYMBOL.to_string(),
        side,
        price,
        quantity,
        fee,
        fee_currency: "USDT".to_string(),
        time: start() + Duration::minutes(index as i64),
        origin: TradeOrigin::Real,
    }
}

/// Generates one fill: side, quantity (0.01 to 100), price (0.01 to 100000)
/// and a USDT fee.
fn arb_fill() -> impl Strategy<Value = (Side, Decimal, Decimal, Decimal)> {
    (
        prop_oneof![Just(Side::Buy), Just(Side::Sell)],
        1i64..10_000,
        1i64..10_000_000,
        0i64..1_000,
    )
        .prop_map(|(side, qty, price, fee)| {
            (
                side,
                Decimal::new(qty, 2),
                Decimal::new(price, 2),
                Decimal::new(fee, 3),
            )
        })
}

/// Generates a chronological trade stream.
fn arb_trades(max_count: usize) -> impl Strategy<Value = Vec<Trade>> {
    proptest::collection::vec(arb_fill(), 0..=max_count).prop_map(|fills| {
        fills
            .into_iter()
            .enumerate()
            .map(|(i, (side, qty, price, fee))| build_trade(i, side, qty, price, fee))
            .collect()
    })
}

/// Appends a trade that brings the stream back to flat, if needed.
fn flatten(mut trades: Vec<Trade>, price: Decimal) -> Vec<Trade> {
    let open: Decimal = trades.iter().map(|t| t.signed_quantity()).sum();
    if !open.is_zero() {
        let side = if open > Decimal::ZERO { Side::Sell } else { Side::Buy };
        let index = trades.len();
        trades.push(build_trade(index, side, open.abs(), price, Decimal::ZERO));
    }
    trades
}

fn replay(trades: &[Trade], mark_price: Decimal) -> PnlReport {
    let tracked = PositionTracker::new(SYMBOL).track(trades).unwrap();
    AverageCostCalculator::new(SYMBOL, "USDT")
        .calculate(trades, &tracked.checkpoints, mark_price)
        .unwrap()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Checkpoints are exactly the trades where the running quantity crosses
    /// zero or lands on it from a nonzero value.
    #[test]
    fn prop_checkpoints_match_sign_changes(trades in arb_trades(40)) {
        let result = PositionTracker::new(SYMBOL).track(&trades).unwrap();

        let mut running = Decimal::ZERO;
        let mut expected = Vec::new();
        for (i, trade) in trades.iter().enumerate() {
            let before = running;
            running += trade.signed_quantity();
            let crossed = (before > Decimal::ZERO && running <= Decimal::ZERO)
                || (before < Decimal::ZERO && running >= Decimal::ZERO);
            if crossed {
                expected.push(i);
            }
        }

        let actual: Vec<usize> = result.checkpoints.iter().map(|c| c.index).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(result.quantity, running);
    }

    /// A flipping trade splits into legs whose quantities sum to the trade's.
    #[test]
    fn prop_flip_legs_conserve_quantity(trades in arb_trades(40)) {
        let result = PositionTracker::new(SYMBOL).track(&trades).unwrap();

        for checkpoint in result.checkpoints.iter().filter(|c| c.is_flip()) {
            let trade = &trades[checkpoint.index];
            let (closing, opening) = split_flip(trade, checkpoint.quantity_before).unwrap();
            prop_assert_eq!(closing.quantity, checkpoint.quantity_before.abs());
            prop_assert_eq!(opening.quantity, checkpoint.quantity_after.abs());
            prop_assert_eq!(closing.quantity + opening.quantity, trade.quantity);
        }
    }

    /// Replaying the same stream twice gives identical reports.
    #[test]
    fn prop_replay_is_deterministic(trades in arb_trades(30), mark in 1i64..10_000_000) {
        let mark = Decimal::new(mark, 2);
        prop_assert_eq!(replay(&trades, mark), replay(&trades, mark));
    }

    /// For a stream that ends flat, realized PnL equals sell proceeds minus
    /// buy cost, and net of quote fees it equals the cash flow less fees.
    #[test]
    fn prop_flat_stream_realizes_cash_flow(
        trades in arb_trades(30),
        close in 1i64..10_000_000,
    ) {
        let trades = flatten(trades, Decimal::new(close, 2));
        let report = replay(&trades, dec!(1));

        let cash_flow: Decimal = trades
            .iter()
            .map(|t| match t.side {
                Side::Sell => t.quote_quantity(),
                Side::Buy => -t.quote_quantity(),
            })
            .sum();
        let fees: Decimal = trades.iter().map(|t| t.fee).sum();
        let tolerance = dec!(0.000000000001);

        prop_assert!(report.quantity.is_zero());
        prop_assert!(report.unrealized_pnl.is_zero());
        prop_assert!((report.realized_pnl - cash_flow).abs() < tolerance);
        prop_assert!((report.net_realized_pnl() - (cash_flow - fees)).abs() < tolerance);
        prop_assert_eq!(report.trading_fee, fees);
    }

    /// Fees are tallied but never move the average cost or realized PnL.
    #[test]
    fn prop_fees_do_not_enter_cost_basis(trades in arb_trades(30)) {
        let without_fees: Vec<Trade> = trades
            .iter()
            .cloned()
            .map(|mut t| {
                t.fee = Decimal::ZERO;
                t
            })
            .collect();

        let with = replay(&trades, dec!(100));
        let without = replay(&without_fees, dec!(100));

        prop_assert_eq!(with.average_cost, without.average_cost);
        prop_assert_eq!(with.realized_pnl, without.realized_pnl);
        prop_assert_eq!(with.unrealized_pnl, without.unrealized_pnl);
        prop_assert!(without.trading_fee.is_zero());
    }

    /// An open position marked at its own average cost has no unrealized PnL.
    #[test]
    fn prop_mark_at_average_cost_is_flat_unrealized(trades in arb_trades(30)) {
        let first = replay(&trades, dec!(1));
        let marked = replay(&trades, first.average_cost);
        prop_assert!(marked.unrealized_pnl.is_zero());
    }
}
