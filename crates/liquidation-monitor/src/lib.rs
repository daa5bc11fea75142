//! DebtPool Liquidation Monitor
//!
//! Scans every stored position against one price snapshot and flags those
//! whose collateralization ratio has dropped below the minimum.
//!
//! The monitor only reports. Flagged positions are handed to a settlement
//! collaborator over an mpsc channel; the monitor never mutates the
//! position store.
//!
//! ```text
//! PriceUpdate (broadcast) ──┐
//!                           ├──► scan() ──► newly flagged ──► mpsc ──► settlement
//! interval tick ────────────┘
//! ```

mod config;
mod error;
mod monitor;
mod report;

pub use config::MonitorConfig;
pub use error::{MonitorError, MonitorResult};
pub use monitor::{LiquidationMonitor, MonitorSummary};
pub use report::ScanReport;
