use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::DEFAULT_TRADE_LIMIT;
use crate::errors::{Error, Result};
use crate::transfers::DepositCostPolicy;

pub const ENV_SYMBOL: &str = "TP_SYMBOL";
pub const ENV_BASE_ASSET: &str = "TP_BASE_ASSET";
pub const ENV_QUOTE_ASSET: &str = "TP_QUOTE_ASSET";
pub const ENV_FEE_CURRENCY: &str = "TP_FEE_CURRENCY";
pub const ENV_TRADE_LIMIT: &str = "TP_TRADE_LIMIT";
pub const ENV_INCLUDE_TRANSFERS: &str = "TP_INCLUDE_TRANSFERS";
pub const ENV_DEPOSIT_COST_POLICY: &str = "TP_DEPOSIT_COST_POLICY";

/// Configuration of a single PnL computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSettings {
    /// Market symbol, e.g. "BTCUSDT"
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    /// Platform fee currency of the exchange. Fees paid in it are totalled
    /// separately from other fee currencies.
    pub fee_currency: String,
    #[serde(default = "default_trade_limit")]
    pub trade_limit: usize,
    #[serde(default = "default_include_transfers")]
    pub include_transfers: bool,
    #[serde(default)]
    pub deposit_cost_policy: DepositCostPolicy,
}

fn default_trade_limit() -> usize {
    DEFAULT_TRADE_LIMIT
}

fn default_include_transfers() -> bool {
    true
}

impl PnlSettings {
    pub fn new(
        base_asset: impl Into<String>,
        quote_asset: impl Into<String>,
        fee_currency: impl Into<String>,
    ) -> Self {
        let base_asset = base_asset.into();
        let quote_asset = quote_asset.into();
        PnlSettings {
            symbol: format!("{}{}", base_asset, quote_asset),
            base_asset,
            quote_asset,
            fee_currency: fee_currency.into(),
            trade_limit: DEFAULT_TRADE_LIMIT,
            include_transfers: true,
            deposit_cost_policy: DepositCostPolicy::default(),
        }
    }

    /// Loads settings from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. `TP_SYMBOL` defaults to
    /// base + quote when absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::MissingConfigKey(key.to_string()))
        };

        let mut settings = PnlSettings::new(
            required(ENV_BASE_ASSET)?,
            required(ENV_QUOTE_ASSET)?,
            required(ENV_FEE_CURRENCY)?,
        );

        if let Some(symbol) = lookup(ENV_SYMBOL).filter(|v| !v.trim().is_empty()) {
            settings.symbol = symbol.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TRADE_LIMIT) {
            settings.trade_limit = raw.trim().parse().map_err(|_| {
                Error::InvalidConfigValue(format!("{}={}", ENV_TRADE_LIMIT, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_INCLUDE_TRANSFERS) {
            settings.include_transfers = raw.trim().parse().map_err(|_| {
                Error::InvalidConfigValue(format!("{}={}", ENV_INCLUDE_TRANSFERS, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_DEPOSIT_COST_POLICY) {
            settings.deposit_cost_policy = DepositCostPolicy::from_str(raw.trim())
                .map_err(|_| {
                    Error::InvalidConfigValue(format!("{}={}", ENV_DEPOSIT_COST_POLICY, raw))
                })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_asset.is_empty() || self.quote_asset.is_empty() {
            return Err(Error::InvalidConfigValue(
                "base and quote assets must be set".to_string(),
            ));
        }
        if self.fee_currency.is_empty() {
            return Err(Error::InvalidConfigValue(
                "fee currency must be set".to_string(),
            ));
        }
        if self.symbol != format!("{}{}", self.base_asset, self.quote_asset) {
            return Err(Error::InvalidConfigValue(format!(
                "symbol {} is not {} + {}",
                self.symbol, self.base_asset, self.quote_asset
            )));
        }
        if self.trade_limit == 0 {
            return Err(Error::InvalidConfigValue(
                "trade limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// True when the traded base asset is the exchange's fee currency, so
    /// fees paid on other markets consume this position.
    pub fn is_fee_currency_symbol(&self) -> bool {
        self.base_asset == self.fee_currency
    }
}
