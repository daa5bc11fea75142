use async_trait::async_trait;
use debtpool_core::{AccountId, LiquidationEvent, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SettlementError;

/// Acknowledgement returned by a settlement executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub id: Uuid,
    pub owner: AccountId,
    /// Debt covered by the settlement
    pub debt_covered: Decimal,
    pub settled_at: Timestamp,
}

/// Port for the external liquidation executor
///
/// Triggered with events produced by the liquidation monitor. Execution
/// happens outside the ledger; the executor reports an explicit outcome.
#[async_trait]
pub trait SettlementExecutor: Send + Sync {
    async fn execute(&self, event: &LiquidationEvent)
    -> Result<SettlementReceipt, SettlementError>;

    /// Executor name for logging
    fn name(&self) -> &str {
        "SettlementExecutor"
    }
}
