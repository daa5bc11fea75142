//! DebtPool Ledger
//!
//! Owns the collateralized debt positions, keyed by account. Every mutation
//! is validated against the minimum collateralization ratio using the spot
//! price read from a [`PriceOracle`](debtpool_ports::PriceOracle).
//!
//! # Concurrency
//!
//! Positions live in a sharded [`DashMap`](dashmap::DashMap). An update holds
//! the entry guard of its owner for the whole read-validate-write cycle, so
//! concurrent updates on one account serialize while different accounts
//! proceed in parallel. Readers clone records under the shard guard and never
//! see a half-applied update.

mod config;
mod delta;
mod pool;
mod sink;
mod store;

pub use config::LedgerConfig;
pub use delta::PositionDelta;
pub use pool::LiquidationPool;
pub use sink::BroadcastEventSink;
pub use store::PositionStore;
