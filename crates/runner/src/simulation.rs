//! Simulation - Ledger, price feed and liquidation loop running together
//!
//! Ties together:
//! - Simulated price feed moving the oracle
//! - Liquidation monitor scanning on ticks and price updates
//! - Dry-run settlement consuming flagged positions

use debtpool_core::{GlobalStats, LiquidationEvent};
use debtpool_ports::{Clock, SettlementExecutor};
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::bootstrap::DebtPoolSystem;
use crate::config::DebtPoolConfig;
use crate::error::{RunnerError, RunnerResult};
use crate::price_feed::PriceFeedSimulator;
use crate::settlement::DryRunSettlement;

/// Simulation results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// Completed monitor scans
    pub scans: u64,
    /// Price feed ticks
    pub price_ticks: u64,
    /// Liquidation events sent to settlement
    pub liquidations_dispatched: u64,
    /// Events acknowledged by the settlement executor
    pub settlements: u64,
    /// Statistics at the end of the run
    pub final_stats: GlobalStats,
}

/// Full ledger simulation
pub struct Simulation {
    config: DebtPoolConfig,
    system: DebtPoolSystem,
    executor: Arc<dyn SettlementExecutor>,
}

impl Simulation {
    /// Bootstrap a simulation with the system clock and dry-run settlement
    pub fn new(config: DebtPoolConfig) -> RunnerResult<Self> {
        let system = DebtPoolSystem::bootstrap(&config)?;
        let executor = Arc::new(DryRunSettlement::new(system.clock.clone()));
        Ok(Self {
            config,
            system,
            executor,
        })
    }

    /// Bootstrap with a custom clock
    pub fn with_clock(config: DebtPoolConfig, clock: Arc<dyn Clock>) -> RunnerResult<Self> {
        let system = DebtPoolSystem::with_clock(&config, clock)?;
        let executor = Arc::new(DryRunSettlement::new(system.clock.clone()));
        Ok(Self {
            config,
            system,
            executor,
        })
    }

    /// Replace the settlement executor
    pub fn with_executor(mut self, executor: Arc<dyn SettlementExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn system(&self) -> &DebtPoolSystem {
        &self.system
    }

    /// Consume liquidation events until the monitor hangs up
    async fn run_settlement(
        executor: Arc<dyn SettlementExecutor>,
        mut events_rx: mpsc::Receiver<LiquidationEvent>,
    ) -> u64 {
        info!("Settlement worker started ({})", executor.name());

        let mut settled = 0;
        while let Some(event) = events_rx.recv().await {
            match executor.execute(&event).await {
                Ok(receipt) => {
                    info!("Settlement {} acknowledged for {}", receipt.id, receipt.owner);
                    settled += 1;
                }
                Err(e) => error!("Settlement failed for {}: {}", event.owner, e),
            }
        }

        info!("Settlement worker stopped after {} settlements", settled);
        settled
    }

    /// Run for the configured duration
    pub async fn run(self) -> RunnerResult<SimulationReport> {
        let duration = Duration::from_millis(self.config.duration_ms);
        info!("Starting simulation for {:?}", duration);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (events_tx, events_rx) = mpsc::channel(self.config.monitor.event_capacity);

        let feed = PriceFeedSimulator::new(self.system.oracle.clone(), self.config.price_feed.clone());
        let feed_handle = tokio::spawn(feed.run(shutdown_rx.clone()));

        let monitor = self.system.monitor.clone();
        let prices = self.system.oracle.subscribe();
        let monitor_shutdown = shutdown_rx.clone();
        let monitor_handle =
            tokio::spawn(async move { monitor.run(Some(prices), events_tx, monitor_shutdown).await });

        let settlement_handle =
            tokio::spawn(Self::run_settlement(self.executor.clone(), events_rx));

        tokio::time::sleep(duration).await;

        info!("Stopping simulation...");
        // Receivers may already be gone if a task failed early
        let _ = shutdown_tx.send(true);

        let price_ticks = feed_handle
            .await
            .map_err(|e| RunnerError::Task(e.to_string()))?;
        let summary = monitor_handle
            .await
            .map_err(|e| RunnerError::Task(e.to_string()))??;
        let settlements = settlement_handle
            .await
            .map_err(|e| RunnerError::Task(e.to_string()))?;

        let final_stats = self.system.service.global_stats()?;

        info!(
            "Simulation complete: {} scans, {} liquidations dispatched, system health {}",
            summary.scans, summary.dispatched, final_stats.system_health
        );

        Ok(SimulationReport {
            scans: summary.scans,
            price_ticks,
            liquidations_dispatched: summary.dispatched,
            settlements,
            final_stats,
        })
    }
}
