use super::{Trade, TradeOrigin};

/// Merges exchange trades with synthetic trades into one chronological
/// stream.
///
/// The sort is stable. Trades sharing a timestamp keep their input order,
/// except that real trades always precede synthetic ones.
pub fn merge_trades(real: Vec<Trade>, synthetic: Vec<Trade>) -> Vec<Trade> {
    let mut merged = real;
    merged.extend(synthetic);
    merged.sort_by_key(|t| (t.time, origin_rank(t.origin)));
    merged
}

fn origin_rank(origin: TradeOrigin) -> u8 {
    match origin {
        TradeOrigin::Real => 0,
        TradeOrigin::Synthetic => 1,
    }
}
