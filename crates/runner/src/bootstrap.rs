//! Bootstrap - Wiring the ledger components from configuration
//!
//! Builds, in order:
//! - Clock and spot price oracle seeded with the configured prices
//! - Position store and liquidation pool sharing one ledger event sink
//! - Seed positions, validated like any other position
//! - Liquidation monitor and request service on top of the store

use debtpool_clock::SystemClock;
use debtpool_core::AccountId;
use debtpool_ledger::{BroadcastEventSink, LiquidationPool, PositionStore};
use debtpool_liquidation_monitor::LiquidationMonitor;
use debtpool_oracle::InMemoryPriceOracle;
use debtpool_ports::Clock;
use debtpool_risk::RiskEvaluator;
use log::info;
use std::sync::Arc;

use crate::config::DebtPoolConfig;
use crate::error::RunnerResult;
use crate::service::DebtPoolService;

/// Fully wired ledger
pub struct DebtPoolSystem {
    pub clock: Arc<dyn Clock>,
    pub oracle: Arc<InMemoryPriceOracle>,
    pub store: Arc<PositionStore>,
    pub pool: Arc<LiquidationPool>,
    pub ledger_events: Arc<BroadcastEventSink>,
    pub monitor: Arc<LiquidationMonitor>,
    pub service: DebtPoolService,
}

impl DebtPoolSystem {
    /// Build with the system clock
    pub fn bootstrap(config: &DebtPoolConfig) -> RunnerResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Build with a custom clock
    pub fn with_clock(config: &DebtPoolConfig, clock: Arc<dyn Clock>) -> RunnerResult<Self> {
        config.validate()?;

        let oracle = Arc::new(InMemoryPriceOracle::with_prices(
            config.monitor.event_capacity,
            clock.clone(),
            config.prices.iter().map(|(c, p)| (*c, *p)),
        )?);

        let ledger_events = Arc::new(BroadcastEventSink::default());
        let evaluator = RiskEvaluator::with_config(config.risk.clone());
        let store = Arc::new(
            PositionStore::new(oracle.clone(), clock.clone(), evaluator)
                .with_config(config.ledger.clone())
                .with_event_sink(ledger_events.clone()),
        );
        let pool = Arc::new(
            LiquidationPool::new(config.liquidation_pool_balance)
                .with_event_sink(ledger_events.clone()),
        );

        for seed in &config.positions {
            store.create(
                AccountId::new(seed.owner.as_str()),
                seed.collateral_amount,
                seed.debt_amount,
                seed.collateral_type,
            )?;
        }

        info!(
            "Bootstrapped ledger: {} prices, {} positions, pool balance {}",
            config.prices.len(),
            store.len(),
            pool.balance()
        );

        let monitor = Arc::new(LiquidationMonitor::new(
            store.clone(),
            config.monitor.clone(),
        ));
        let service = DebtPoolService::new(store.clone(), pool.clone());

        Ok(Self {
            clock,
            oracle,
            store,
            pool,
            ledger_events,
            monitor,
            service,
        })
    }
}
