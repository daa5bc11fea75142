//! Liquidation Monitor Integration Test
//!
//! Runs the monitor loop against a live oracle and position store:
//! 1. Healthy positions produce no events
//! 2. A price drop triggers a scan and dispatches the flagged position once
//! 3. Repeated scans over unchanged data do not re-dispatch
//! 4. A gap in the price feed does not re-dispatch either
//! 5. Shutdown stops the loop and reports its counters

use debtpool_clock::ManualClock;
use debtpool_core::{AccountId, CollateralRatio, CollateralType};
use debtpool_ledger::{LedgerConfig, PositionDelta, PositionStore};
use debtpool_liquidation_monitor::{LiquidationMonitor, MonitorConfig, MonitorError};
use debtpool_oracle::InMemoryPriceOracle;
use debtpool_risk::RiskEvaluator;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

fn build() -> (Arc<InMemoryPriceOracle>, Arc<PositionStore>) {
    let clock = Arc::new(ManualClock::new(None));
    let oracle = Arc::new(
        InMemoryPriceOracle::with_prices(
            64,
            clock.clone(),
            [
                (CollateralType::Stx, dec!(1)),
                (CollateralType::Btc, dec!(60000)),
            ],
        )
        .unwrap(),
    );
    let store = PositionStore::new(oracle.clone(), clock, RiskEvaluator::new())
        .with_config(LedgerConfig::all_collateral());
    (oracle, Arc::new(store))
}

fn config() -> MonitorConfig {
    MonitorConfig {
        scan_interval_ms: 1_000,
        event_capacity: 16,
    }
}

#[test]
fn test_repeated_scans_are_identical() {
    let (oracle, store) = build();
    for (owner, collateral) in [("SP3", dec!(1300)), ("SP1", dec!(1250)), ("SP2", dec!(5000))] {
        store
            .create(AccountId::new(owner), collateral, dec!(800), CollateralType::Stx)
            .unwrap();
    }
    oracle.set_price(CollateralType::Stx, dec!(0.9)).unwrap();

    let monitor = LiquidationMonitor::new(store.clone(), config());
    let first = monitor.scan().unwrap();
    let second = monitor.scan().unwrap();

    assert_eq!(first.flagged, second.flagged);
    let owners: Vec<&str> = first.flagged.iter().map(|e| e.owner.as_str()).collect();
    assert_eq!(owners, vec!["SP1", "SP3"]);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_unpriced_collateral_reported() {
    let (oracle, store) = build();
    store
        .create(AccountId::new("SP-BTC"), dec!(1), dec!(10000), CollateralType::Btc)
        .unwrap();
    store
        .create(AccountId::new("SP-STX"), dec!(1000), dec!(600), CollateralType::Stx)
        .unwrap();
    oracle.clear_price(CollateralType::Btc);
    oracle.set_price(CollateralType::Stx, dec!(0.5)).unwrap();

    let monitor = LiquidationMonitor::new(store, config());
    let report = monitor.scan().unwrap();

    assert_eq!(report.unpriced, vec![AccountId::new("SP-BTC")]);
    assert_eq!(report.flagged.len(), 1);
    assert!(report.is_flagged(&AccountId::new("SP-STX")));
    // 600 * 1.5 - 500
    assert_eq!(report.total_shortfall(), dec!(400));
}

#[tokio::test(start_paused = true)]
async fn test_loop_dispatches_newly_flagged_once() {
    let _ = env_logger::try_init();

    let (oracle, store) = build();
    let owner = AccountId::new("SP1234...ABC567");
    store
        .create(owner.clone(), dec!(1500), dec!(800), CollateralType::Stx)
        .unwrap();

    let monitor = Arc::new(LiquidationMonitor::new(store.clone(), config()));
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = {
        let monitor = monitor.clone();
        let prices = oracle.subscribe();
        tokio::spawn(async move { monitor.run(Some(prices), events_tx, shutdown_rx).await })
    };

    // Let the initial scan run
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(events_rx.try_recv().is_err());

    // 1500 * 0.6 / 800 = 112.5%
    oracle.set_price(CollateralType::Stx, dec!(0.6)).unwrap();
    let event = events_rx.recv().await.unwrap();
    assert_eq!(event.owner, owner);
    assert_eq!(event.ratio, CollateralRatio::Finite(dec!(112.5)));

    // Several interval scans later, still only one event
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert!(events_rx.try_recv().is_err());

    // Recovery then relapse dispatches again
    store.update(&owner, PositionDelta::deposit(dec!(1000))).unwrap();
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    oracle.set_price(CollateralType::Stx, dec!(0.4)).unwrap();
    let again = events_rx.recv().await.unwrap();
    assert_eq!(again.owner, owner);

    shutdown_tx.send(true).unwrap();
    let summary = handle.await.unwrap().unwrap();
    assert_eq!(summary.dispatched, 2);
    assert!(summary.scans >= 5);
}

#[tokio::test(start_paused = true)]
async fn test_price_gap_keeps_flag() {
    let (oracle, store) = build();
    let owner = AccountId::new("SP1234...ABC567");
    store
        .create(owner.clone(), dec!(1500), dec!(800), CollateralType::Stx)
        .unwrap();
    oracle.set_price(CollateralType::Stx, dec!(0.5)).unwrap();

    let monitor = Arc::new(LiquidationMonitor::new(store.clone(), config()));
    let (events_tx, mut events_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = {
        let monitor = monitor.clone();
        let prices = oracle.subscribe();
        tokio::spawn(async move { monitor.run(Some(prices), events_tx, shutdown_rx).await })
    };

    let event = events_rx.recv().await.unwrap();
    assert_eq!(event.owner, owner);

    // Price disappears for an interval scan, then returns unchanged
    oracle.clear_price(CollateralType::Stx);
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert_eq!(monitor.scan().unwrap().unpriced, vec![owner.clone()]);

    oracle.set_price(CollateralType::Stx, dec!(0.5)).unwrap();
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert!(events_rx.try_recv().is_err());

    shutdown_tx.send(true).unwrap();
    let summary = handle.await.unwrap().unwrap();
    assert_eq!(summary.dispatched, 1);
    assert_eq!(summary.failed_scans, 0);
}

#[tokio::test(start_paused = true)]
async fn test_loop_fails_when_receiver_dropped() {
    let (oracle, store) = build();
    store
        .create(AccountId::new("SP1"), dec!(1500), dec!(800), CollateralType::Stx)
        .unwrap();
    oracle.set_price(CollateralType::Stx, dec!(0.5)).unwrap();

    let monitor = LiquidationMonitor::new(store, config());
    let (events_tx, events_rx) = mpsc::channel(1);
    drop(events_rx);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let result = monitor.run(None, events_tx, shutdown_rx).await;
    assert_eq!(result, Err(MonitorError::ChannelClosed));
}

#[tokio::test(start_paused = true)]
async fn test_loop_stops_when_shutdown_dropped() {
    let (_, store) = build();
    let monitor = LiquidationMonitor::new(store, config());
    let (events_tx, _events_rx) = mpsc::channel(1);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    drop(shutdown_tx);

    let summary = monitor.run(None, events_tx, shutdown_rx).await.unwrap();
    assert_eq!(summary.dispatched, 0);
}
