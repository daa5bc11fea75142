//! DebtPool Simulation Integration Test
//!
//! Runs the full system with:
//! - Price feed driving the oracle
//! - Liquidation monitor scanning on ticks and price updates
//! - Settlement executor consuming flagged positions
//! - Request service reading positions and statistics

use async_trait::async_trait;
use debtpool_core::{AccountId, CollateralType, LedgerEvent, LiquidationEvent, RiskTier};
use debtpool_ports::{SettlementError, SettlementExecutor, SettlementReceipt};
use debtpool_runner::{
    DebtPoolConfig, DebtPoolSystem, PositionRequest, PriceFeedConfig, SeedPosition, Simulation,
};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

fn config() -> DebtPoolConfig {
    DebtPoolConfig {
        positions: vec![
            SeedPosition {
                owner: "SP-EDGE".to_string(),
                collateral_amount: dec!(1510),
                debt_amount: dec!(1000),
                collateral_type: CollateralType::Stx,
            },
            SeedPosition {
                owner: "SP-SAFE".to_string(),
                collateral_amount: dec!(5000),
                debt_amount: dec!(1000),
                collateral_type: CollateralType::Stx,
            },
        ],
        price_feed: PriceFeedConfig {
            volatility: dec!(0),
            tick_interval_ms: 100,
            seed: Some(42),
        },
        duration_ms: 2_000,
        ..Default::default()
    }
}

/// Price crash flags the edge position exactly once
#[tokio::test(start_paused = true)]
async fn test_simulation_flags_after_crash() {
    let _ = env_logger::try_init();

    let mut config = config();
    config.monitor.scan_interval_ms = 200;

    let simulation = Simulation::new(config).unwrap();
    // 1510 * 0.5 / 1000 = 75.5%; 5000 * 0.5 / 1000 = 250%
    simulation
        .system()
        .oracle
        .set_price(CollateralType::Stx, dec!(0.5))
        .unwrap();

    let report = simulation.run().await.unwrap();

    assert_eq!(report.liquidations_dispatched, 1);
    assert_eq!(report.settlements, 1);
    assert!(report.scans >= 10);
    assert!(report.price_ticks >= 19);

    // Dry-run settlement leaves the ledger untouched
    assert_eq!(report.final_stats.position_count, 2);
    assert_eq!(report.final_stats.active_liquidations(), 1);
    assert_eq!(report.final_stats.risk_distribution.count(RiskTier::Low), 1);
    assert_eq!(report.final_stats.total_debt, dec!(2000));
}

/// Stable prices and healthy positions produce no liquidations
#[tokio::test(start_paused = true)]
async fn test_quiet_simulation() {
    let report = Simulation::new(config()).unwrap().run().await.unwrap();

    assert_eq!(report.liquidations_dispatched, 0);
    assert_eq!(report.settlements, 0);
    assert_eq!(report.final_stats.total_collateral_value, dec!(6510));
    assert_eq!(report.final_stats.liquidation_pool_balance, dec!(45000));
}

struct RejectingExecutor {
    attempts: AtomicU64,
}

#[async_trait]
impl SettlementExecutor for RejectingExecutor {
    async fn execute(
        &self,
        _event: &LiquidationEvent,
    ) -> Result<SettlementReceipt, SettlementError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SettlementError::Unavailable("node offline".to_string()))
    }
}

/// Failed settlements are counted as dispatched but not settled
#[tokio::test(start_paused = true)]
async fn test_rejected_settlement() {
    let executor = Arc::new(RejectingExecutor {
        attempts: AtomicU64::new(0),
    });
    let simulation = Simulation::new(config())
        .unwrap()
        .with_executor(executor.clone());
    simulation
        .system()
        .oracle
        .set_price(CollateralType::Stx, dec!(0.5))
        .unwrap();

    let report = simulation.run().await.unwrap();

    assert_eq!(report.liquidations_dispatched, 1);
    assert_eq!(report.settlements, 0);
    assert_eq!(executor.attempts.load(Ordering::SeqCst), 1);
}

/// Requests flow through the service and publish ledger events
#[tokio::test]
async fn test_service_requests_publish_events() {
    let system = DebtPoolSystem::bootstrap(&config()).unwrap();
    let mut events = system.ledger_events.subscribe();

    let response = system
        .service
        .handle(PositionRequest::Open {
            owner: "SP-NEW".to_string(),
            collateral_amount: "3000".to_string(),
            debt_amount: "1000".to_string(),
            collateral_type: "STX".to_string(),
        })
        .unwrap();
    assert_eq!(response.assessment.unwrap().tier, RiskTier::Low);

    system
        .service
        .handle(PositionRequest::Borrow {
            owner: "SP-NEW".to_string(),
            amount: "500".to_string(),
        })
        .unwrap();

    match events.recv().await.unwrap() {
        LedgerEvent::PositionOpened(p) => assert_eq!(p.owner, AccountId::new("SP-NEW")),
        other => panic!("Unexpected event: {:?}", other),
    }
    match events.recv().await.unwrap() {
        LedgerEvent::PositionUpdated(p) => assert_eq!(p.debt_amount, dec!(1500)),
        other => panic!("Unexpected event: {:?}", other),
    }

    system.pool.fund(dec!(5000)).unwrap();
    assert!(matches!(
        events.recv().await.unwrap(),
        LedgerEvent::PoolFunded { .. }
    ));

    let stats = system.service.global_stats().unwrap();
    assert_eq!(stats.position_count, 3);
    assert_eq!(stats.liquidation_pool_balance, dec!(50000));
}

/// Configuration round-trips through a file on disk
#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("debtpool-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{ "prices": { "STX": "2" }, "monitor": { "scan_interval_ms": 100 }, "duration_ms": 500 }"#,
    )
    .unwrap();

    let config = DebtPoolConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.prices.get(&CollateralType::Stx), Some(&dec!(2)));
    assert_eq!(config.monitor.scan_interval_ms, 100);
    assert_eq!(config.duration_ms, 500);
    assert_eq!(config.positions.len(), 1);
    assert!(config.validate().is_ok());
}
