use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::{DepositCostPolicy, Transfer, TransferKind, TransferSourceTrait};
use crate::constants::{SYNTHETIC_DEPOSIT_PREFIX, SYNTHETIC_WITHDRAWAL_PREFIX};
use crate::errors::Result;
use crate::market_data::DailyPriceMap;
use crate::trades::{Side, Trade, TradeOrigin};
use crate::utils::time_utils::TimeRange;

/// Converts withdrawals and deposits of the base asset into synthetic trades
/// so the position tracker sees every change of holdings.
#[derive(Debug, Clone)]
pub struct TransferConverter {
    base_asset: String,
    quote_asset: String,
    deposit_cost_policy: DepositCostPolicy,
}

impl TransferConverter {
    pub fn new(base_asset: impl Into<String>, quote_asset: impl Into<String>) -> Self {
        Self {
            base_asset: base_asset.into(),
            quote_asset: quote_asset.into(),
            deposit_cost_policy: DepositCostPolicy::default(),
        }
    }

    pub fn with_deposit_cost_policy(mut self, policy: DepositCostPolicy) -> Self {
        self.deposit_cost_policy = policy;
        self
    }

    pub fn symbol(&self) -> String {
        format!("{}{}", self.base_asset, self.quote_asset)
    }

    /// Converts the participating transfers into synthetic trades, oldest
    /// first.
    ///
    /// A transfer participates when it is confirmed, moves the base asset,
    /// has a positive amount and falls inside `range`. If any participating
    /// transfer cannot be priced the whole batch fails with
    /// `PricingUnavailable`.
    pub fn convert(
        &self,
        transfers: &[Transfer],
        range: TimeRange,
        prices: &DailyPriceMap,
    ) -> Result<Vec<Trade>> {
        let symbol = self.symbol();
        let mut trades = Vec::new();

        for transfer in transfers {
            if !self.participates(transfer, range) {
                continue;
            }
            let trade = match transfer.kind {
                TransferKind::Withdrawal => self.convert_withdrawal(transfer, &symbol, prices)?,
                TransferKind::Deposit => self.convert_deposit(transfer, &symbol, prices)?,
            };
            trades.push(trade);
        }

        trades.sort_by_key(|t| t.time);
        debug!(
            "Converted {} of {} transfers into synthetic {} trades",
            trades.len(),
            transfers.len(),
            symbol
        );
        Ok(trades)
    }

    /// Queries withdrawal and deposit history of the base asset concurrently.
    /// Source errors propagate unchanged and no partial history is returned.
    pub async fn query_transfers(
        &self,
        source: &dyn TransferSourceTrait,
        range: TimeRange,
    ) -> Result<Vec<Transfer>> {
        let (mut transfers, deposits) = tokio::try_join!(
            source.query_withdraw_history(&self.base_asset, range.since, range.until),
            source.query_deposit_history(&self.base_asset, range.since, range.until),
        )?;
        info!(
            "{} withdrawals and {} deposits of {} loaded",
            transfers.len(),
            deposits.len(),
            self.base_asset
        );
        transfers.extend(deposits);
        Ok(transfers)
    }

    fn participates(&self, transfer: &Transfer, range: TimeRange) -> bool {
        if transfer.asset != self.base_asset {
            debug!(
                "Skipping transfer {} of {}: not the base asset {}",
                transfer.id, transfer.asset, self.base_asset
            );
            return false;
        }
        if !transfer.is_confirmed() {
            debug!(
                "Skipping transfer {} with status {:?}",
                transfer.id, transfer.status
            );
            return false;
        }
        if !range.contains(transfer.time) {
            debug!(
                "Skipping transfer {} at {}: outside query window",
                transfer.id, transfer.time
            );
            return false;
        }
        if transfer.amount <= Decimal::ZERO {
            warn!(
                "Skipping transfer {} with non-positive amount {}",
                transfer.id, transfer.amount
            );
            return false;
        }
        true
    }

    fn convert_withdrawal(
        &self,
        withdrawal: &Transfer,
        symbol: &str,
        prices: &DailyPriceMap,
    ) -> Result<Trade> {
        let price = match withdrawal.price {
            Some(price) => price,
            None => prices.require(&self.base_asset, withdrawal.time)?,
        };
        Ok(self.synthetic_trade(
            withdrawal,
            symbol,
            Side::Sell,
            price,
            SYNTHETIC_WITHDRAWAL_PREFIX,
        ))
    }

    fn convert_deposit(
        &self,
        deposit: &Transfer,
        symbol: &str,
        prices: &DailyPriceMap,
    ) -> Result<Trade> {
        let price = match (deposit.price, self.deposit_cost_policy) {
            (_, DepositCostPolicy::ZeroCost) => Decimal::ZERO,
            (Some(price), DepositCostPolicy::AcquisitionCost) => price,
            (None, DepositCostPolicy::AcquisitionCost) => {
                prices.require(&self.base_asset, deposit.time)?
            }
        };
        Ok(self.synthetic_trade(deposit, symbol, Side::Buy, price, SYNTHETIC_DEPOSIT_PREFIX))
    }

    fn synthetic_trade(
        &self,
        transfer: &Transfer,
        symbol: &str,
        side: Side,
        price: Decimal,
        prefix: &str,
    ) -> Trade {
        Trade {
            id: format!("{}-{}", prefix, transfer.id),
            order_id: None,
            exchange: transfer.exchange.clone(),
            symbol: symbol.to_string(),
            side,
            price,
            quantity: transfer.amount,
            fee: transfer.fee,
            fee_currency: transfer.asset.clone(),
            time: transfer.time,
            origin: TradeOrigin::Synthetic,
        }
    }
}
