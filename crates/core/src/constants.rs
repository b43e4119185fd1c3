/// Default number of trades requested from the trade source
pub const DEFAULT_TRADE_LIMIT: usize = 500;

/// Prefix for identifiers of synthetic trades built from withdrawals
pub const SYNTHETIC_WITHDRAWAL_PREFIX: &str = "WD";

/// Prefix for identifiers of synthetic trades built from deposits
pub const SYNTHETIC_DEPOSIT_PREFIX: &str = "DP";

/// Prefix for identifiers of synthetic trades built from fee consumption
pub const SYNTHETIC_FEE_PREFIX: &str = "FEE";
