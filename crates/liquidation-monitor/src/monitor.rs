use debtpool_core::{AccountId, LiquidationEvent, Position, Price, PriceUpdate};
use debtpool_ledger::PositionStore;
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::config::MonitorConfig;
use crate::error::{MonitorError, MonitorResult};
use crate::report::ScanReport;

/// Counters returned when the monitor loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    /// Completed scans
    pub scans: u64,
    /// Scans that failed on the oracle
    pub failed_scans: u64,
    /// Liquidation events sent downstream
    pub dispatched: u64,
}

/// Flags positions below the minimum collateralization ratio
pub struct LiquidationMonitor {
    store: Arc<PositionStore>,
    config: MonitorConfig,
}

impl LiquidationMonitor {
    pub fn new(store: Arc<PositionStore>, config: MonitorConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Evaluate every position against one price snapshot
    ///
    /// Read-only: repeated scans over unchanged positions and prices flag the
    /// same owners with equal events.
    pub fn scan(&self) -> MonitorResult<ScanReport> {
        let prices = self.store.oracle().snapshot().map_err(|e| {
            error!("Liquidation scan aborted: {}", e);
            MonitorError::from(e)
        })?;

        let mut report = ScanReport {
            taken_at: prices.taken_at,
            ..Default::default()
        };

        for position in self.store.snapshot() {
            report.scanned += 1;
            let Some(price) = prices.get(position.collateral_type) else {
                debug!(
                    "No {} price, skipping position {}",
                    position.collateral_type, position.owner
                );
                report.unpriced.push(position.owner);
                continue;
            };

            if let Some(event) = self.flag(&position, price) {
                report.flagged.push(event);
            }
        }

        debug!(
            "Scan complete: {} positions, {} flagged, {} unpriced",
            report.scanned,
            report.flagged.len(),
            report.unpriced.len()
        );
        Ok(report)
    }

    /// Build a liquidation event if `position` is liquidatable at `price`
    pub fn flag(&self, position: &Position, price: Price) -> Option<LiquidationEvent> {
        let evaluator = self.store.evaluator();
        let assessment = evaluator.evaluate(position, price);
        if !assessment.tier.is_liquidatable() {
            return None;
        }

        let shortfall = evaluator.shortfall(position, price);
        let collateral_shortfall = if price.is_zero() {
            Decimal::ZERO
        } else {
            shortfall.checked_div(price).unwrap_or(Decimal::MAX)
        };

        Some(LiquidationEvent {
            owner: position.owner.clone(),
            collateral_type: position.collateral_type,
            collateral_amount: position.collateral_amount,
            debt_amount: position.debt_amount,
            price,
            collateral_value: assessment.collateral_value,
            ratio: assessment.ratio,
            shortfall,
            collateral_shortfall,
        })
    }

    /// Scan periodically and on every price update until `shutdown` flips
    ///
    /// Only positions that were not flagged by the previous scan are sent to
    /// `events`. A flagged position whose price goes missing stays flagged. Fails with [`MonitorError::ChannelClosed`] once the
    /// receiving side is gone.
    pub async fn run(
        &self,
        prices: Option<broadcast::Receiver<PriceUpdate>>,
        events: mpsc::Sender<LiquidationEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> MonitorResult<MonitorSummary> {
        let mut prices = prices;
        let mut ticker = tokio::time::interval(self.config.scan_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut summary = MonitorSummary::default();
        let mut previously_flagged: HashSet<AccountId> = HashSet::new();

        info!(
            "Liquidation monitor started (interval {}ms)",
            self.config.scan_interval_ms
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }

                _ = ticker.tick() => {}

                result = async {
                    match &mut prices {
                        Some(rx) => rx.recv().await,
                        None => std::future::pending().await,
                    }
                } => {
                    match result {
                        Ok(update) => {
                            debug!("Price update {} = {}, rescanning", update.collateral_type, update.price);
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!("Lagged {} price updates", n);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            info!("Price stream closed, continuing on interval only");
                            prices = None;
                            continue;
                        }
                    }
                }
            }

            self.cycle(&events, &mut previously_flagged, &mut summary)
                .await?;
        }

        info!(
            "Liquidation monitor stopped after {} scans ({} events dispatched)",
            summary.scans, summary.dispatched
        );
        Ok(summary)
    }

    async fn cycle(
        &self,
        events: &mpsc::Sender<LiquidationEvent>,
        previously_flagged: &mut HashSet<AccountId>,
        summary: &mut MonitorSummary,
    ) -> MonitorResult<()> {
        let report = match self.scan() {
            Ok(report) => report,
            Err(_) => {
                summary.failed_scans += 1;
                return Ok(());
            }
        };
        summary.scans += 1;

        // An unpriced owner keeps its flag until a priced scan clears it
        let mut flagged_now: HashSet<AccountId> = report
            .unpriced
            .iter()
            .filter(|owner| previously_flagged.contains(*owner))
            .cloned()
            .collect();
        for event in report.flagged {
            flagged_now.insert(event.owner.clone());
            if previously_flagged.contains(&event.owner) {
                continue;
            }

            warn!(
                "Position {} flagged for liquidation: ratio {} shortfall {}",
                event.owner, event.ratio, event.shortfall
            );
            events
                .send(event)
                .await
                .map_err(|_| MonitorError::ChannelClosed)?;
            summary.dispatched += 1;
        }
        *previously_flagged = flagged_now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debtpool_clock::ManualClock;
    use debtpool_core::{CollateralRatio, CollateralType};
    use debtpool_oracle::InMemoryPriceOracle;
    use debtpool_risk::RiskEvaluator;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<InMemoryPriceOracle>, Arc<PositionStore>) {
        let clock = Arc::new(ManualClock::new(None));
        let oracle = Arc::new(InMemoryPriceOracle::with_clock(16, clock.clone()));
        oracle.set_price(CollateralType::Stx, dec!(1.6)).unwrap();
        let store = Arc::new(PositionStore::new(oracle.clone(), clock, RiskEvaluator::new()));
        (oracle, store)
    }

    #[test]
    fn test_flags_below_minimum() {
        let (oracle, store) = setup();
        let owner = AccountId::new("SP1234...ABC567");
        store
            .create(owner.clone(), dec!(1000), dec!(800), CollateralType::Stx)
            .unwrap();
        oracle.set_price(CollateralType::Stx, dec!(1)).unwrap();

        let monitor = LiquidationMonitor::new(store, MonitorConfig::default());
        let report = monitor.scan().unwrap();

        assert_eq!(report.scanned, 1);
        assert_eq!(report.flagged.len(), 1);
        let event = &report.flagged[0];
        assert_eq!(event.owner, owner);
        assert_eq!(event.ratio, CollateralRatio::Finite(dec!(125)));
        assert_eq!(event.shortfall, dec!(200));
        assert_eq!(event.collateral_shortfall, dec!(200));
    }

    #[test]
    fn test_healthy_positions_not_flagged() {
        let (_, store) = setup();
        store
            .create(AccountId::new("SP1"), dec!(1500), dec!(800), CollateralType::Stx)
            .unwrap();

        let monitor = LiquidationMonitor::new(store, MonitorConfig::default());
        assert!(monitor.scan().unwrap().is_clear());
    }

    #[test]
    fn test_unpriced_positions_skipped() {
        let (oracle, store) = setup();
        store
            .create(AccountId::new("SP1"), dec!(1500), dec!(800), CollateralType::Stx)
            .unwrap();
        oracle.clear_price(CollateralType::Stx);

        let monitor = LiquidationMonitor::new(store.clone(), MonitorConfig::default());
        let report = monitor.scan().unwrap();

        assert_eq!(report.unpriced, vec![AccountId::new("SP1")]);
        assert!(report.flagged.is_empty());
        assert_eq!(store.len(), 1);
    }
}
