use async_trait::async_trait;
use debtpool_core::LiquidationEvent;
use debtpool_ports::{Clock, SettlementError, SettlementExecutor, SettlementReceipt};
use log::info;
use std::sync::Arc;
use uuid::Uuid;

/// Settlement executor that only logs
///
/// Real liquidation happens on-chain. This executor acknowledges every event
/// without touching the ledger, so flagged positions stay flagged until their
/// owner tops them up.
pub struct DryRunSettlement {
    clock: Arc<dyn Clock>,
}

impl DryRunSettlement {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl SettlementExecutor for DryRunSettlement {
    async fn execute(
        &self,
        event: &LiquidationEvent,
    ) -> Result<SettlementReceipt, SettlementError> {
        info!(
            "[dry-run] would liquidate {}: {} {} backing {} debt (ratio {}, shortfall {})",
            event.owner,
            event.collateral_amount,
            event.collateral_type,
            event.debt_amount,
            event.ratio,
            event.shortfall
        );

        Ok(SettlementReceipt {
            id: Uuid::new_v4(),
            owner: event.owner.clone(),
            debt_covered: event.debt_amount,
            settled_at: self.clock.now(),
        })
    }

    fn name(&self) -> &str {
        "DryRunSettlement"
    }
}
