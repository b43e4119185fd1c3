use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Transfer;
use crate::errors::Result;

/// Exchange collaborator that returns deposit and withdrawal history.
///
/// Records of every status may be returned; the engine filters to confirmed
/// ones.
#[async_trait]
pub trait TransferSourceTrait: Send + Sync {
    async fn query_withdraw_history(
        &self,
        asset: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Transfer>>;

    async fn query_deposit_history(
        &self,
        asset: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Transfer>>;
}
