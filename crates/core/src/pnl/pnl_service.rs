use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{AverageCostCalculator, PnlReport, PositionTracker};
use crate::errors::{Error, Result};
use crate::market_data::{DailyPriceMap, DailyPriceOracle};
use crate::settings::PnlSettings;
use crate::trades::{
    merge_trades, FeeConsumptionConverter, QueryTradesOptions, Trade, TradeSourceTrait,
};
use crate::transfers::{Transfer, TransferConverter, TransferSourceTrait};
use crate::utils::time_utils::TimeRange;

/// One PnL question: which market, over which window, valued at which price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlRequest {
    pub settings: PnlSettings,
    pub range: TimeRange,
    pub mark_price: Decimal,
}

#[async_trait]
pub trait PnlServiceTrait: Send + Sync {
    async fn calculate(&self, request: &PnlRequest) -> Result<PnlReport>;

    async fn calculate_with_cancel(
        &self,
        request: &PnlRequest,
        cancel: &CancellationToken,
    ) -> Result<PnlReport>;
}

/// Fetches trade, transfer and price history, then replays it.
///
/// Holds only collaborators; every call builds its own position and report,
/// so concurrent calls for different symbols do not interact.
pub struct PnlService {
    trade_source: Arc<dyn TradeSourceTrait>,
    transfer_source: Arc<dyn TransferSourceTrait>,
    price_oracle: DailyPriceOracle,
}

impl PnlService {
    pub fn new(
        trade_source: Arc<dyn TradeSourceTrait>,
        transfer_source: Arc<dyn TransferSourceTrait>,
        price_oracle: DailyPriceOracle,
    ) -> Self {
        Self {
            trade_source,
            transfer_source,
            price_oracle,
        }
    }

    async fn load_trades(&self, settings: &PnlSettings, range: TimeRange) -> Result<Vec<Trade>> {
        let trades = if settings.is_fee_currency_symbol() {
            info!(
                "Loading all trading fee currency related trades: {}",
                settings.symbol
            );
            self.trade_source
                .query_trades_for_fee_currency(&settings.symbol, &settings.fee_currency, range)
                .await?
        } else {
            let options = QueryTradesOptions::new(settings.symbol.clone())
                .with_range(range)
                .with_limit(settings.trade_limit);
            self.trade_source.query_trades(&options).await?
        };
        info!("{} trades loaded", trades.len());
        Ok(trades)
    }

    async fn load_transfers(
        &self,
        settings: &PnlSettings,
        converter: &TransferConverter,
        range: TimeRange,
    ) -> Result<Vec<Transfer>> {
        if !settings.include_transfers {
            return Ok(Vec::new());
        }
        converter
            .query_transfers(self.transfer_source.as_ref(), range)
            .await
    }

    async fn load_prices(
        &self,
        settings: &PnlSettings,
        range: TimeRange,
        cancel: &CancellationToken,
    ) -> Result<DailyPriceMap> {
        if !settings.include_transfers && !settings.is_fee_currency_symbol() {
            return Ok(DailyPriceMap::empty(settings.symbol.clone()));
        }
        self.price_oracle
            .build_with_cancel(&settings.symbol, range.to_day_start(), cancel)
            .await
    }

    async fn run(&self, request: &PnlRequest, cancel: &CancellationToken) -> Result<PnlReport> {
        let settings = &request.settings;
        settings.validate()?;
        let range = request.range;

        let converter =
            TransferConverter::new(settings.base_asset.clone(), settings.quote_asset.clone())
                .with_deposit_cost_policy(settings.deposit_cost_policy);

        // Every ingestion task must finish before anything is replayed.
        let (trades, transfers, prices) = tokio::try_join!(
            self.load_trades(settings, range),
            self.load_transfers(settings, &converter, range),
            self.load_prices(settings, range, cancel),
        )?;

        let trades = if settings.is_fee_currency_symbol() {
            FeeConsumptionConverter::new(settings.symbol.clone(), settings.fee_currency.clone())
                .convert(trades, &prices)?
        } else {
            trades
        };

        let synthetic = converter.convert(&transfers, range, &prices)?;

        let merged = merge_trades(trades, synthetic);
        debug!(
            "{} trades in merged stream for {} ({} synthetic)",
            merged.len(),
            settings.symbol,
            merged.iter().filter(|t| t.is_synthetic()).count()
        );

        let tracked = PositionTracker::new(settings.symbol.clone()).track(&merged)?;
        info!(
            "Found checkpoints: {:?}",
            tracked
                .checkpoints
                .iter()
                .map(|c| c.index)
                .collect::<Vec<_>>()
        );
        info!("Stock: {}", tracked.quantity);

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        AverageCostCalculator::new(settings.symbol.clone(), settings.fee_currency.clone())
            .calculate(&merged, &tracked.checkpoints, request.mark_price)
    }
}

#[async_trait]
impl PnlServiceTrait for PnlService {
    async fn calculate(&self, request: &PnlRequest) -> Result<PnlReport> {
        self.calculate_with_cancel(request, &CancellationToken::new())
            .await
    }

    async fn calculate_with_cancel(
        &self,
        request: &PnlRequest,
        cancel: &CancellationToken,
    ) -> Result<PnlReport> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.run(request, cancel) => result,
        }
    }
}
