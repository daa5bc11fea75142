//! DebtPool Runner - Collateralized debt ledger orchestration
//!
//! Wires the ledger crates into a running system:
//!
//! - **Config**: JSON configuration with environment overrides
//! - **Bootstrap**: Oracle, position store, pool and monitor from config
//! - **Service**: Request/response handlers for position management and stats
//! - **Price Feed**: Seeded random walk driving the oracle
//! - **Settlement**: Dry-run executor for flagged positions
//! - **Simulation**: Everything above running for a fixed duration
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐  set_price   ┌──────────────┐
//!   │  Price Feed  │─────────────►│    Oracle    │
//!   └──────────────┘              └──────┬───────┘
//!                                        │ spot prices / PriceUpdate
//!                  ┌─────────────────────┼──────────────────────┐
//!                  ▼                     ▼                      ▼
//!   ┌──────────────────┐   ┌──────────────────────┐   ┌──────────────────┐
//!   │  DebtPoolService │──►│    PositionStore     │◄──│ LiquidationMonitor│
//!   │ (requests, stats)│   │ (dashmap, per owner) │   │ (scan loop)       │
//!   └──────────────────┘   └──────────────────────┘   └────────┬─────────┘
//!                                                              │ LiquidationEvent
//!                                                              ▼
//!                                                    ┌──────────────────┐
//!                                                    │    Settlement    │
//!                                                    └──────────────────┘
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod price_feed;
pub mod service;
pub mod settlement;
pub mod simulation;

// Re-export main types
pub use bootstrap::DebtPoolSystem;
pub use config::{DebtPoolConfig, PriceFeedConfig, SeedPosition};
pub use error::{ConfigError, RunnerError, RunnerResult};
pub use price_feed::PriceFeedSimulator;
pub use service::{DebtPoolService, PositionRequest, PositionResponse};
pub use settlement::DryRunSettlement;
pub use simulation::{Simulation, SimulationReport};
