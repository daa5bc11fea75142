//! DebtPool Core Domain
//!
//! Pure domain types for the DebtPool collateralized debt ledger.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod events;
pub mod risk;
pub mod stats;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{AccountId, CollateralType, ParseCollateralTypeError, Position};
pub use events::{LedgerEvent, LiquidationEvent, PriceUpdate};
pub use risk::{CollateralRatio, RiskAssessment, RiskTier};
pub use stats::{GlobalStats, RiskDistribution};
pub use values::{Amount, PERCENT, Price, PriceSnapshot, Timestamp};
