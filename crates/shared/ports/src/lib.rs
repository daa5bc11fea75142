//! DebtPool Ports
//!
//! Port definitions (traits) for the DebtPool ledger.
//! These define the boundaries between domain logic and the external
//! collaborators: time source, price oracle, event consumers and the
//! liquidation settlement executor.

mod clock;
mod error;
mod events;
mod oracle;
mod settlement;

pub use clock::Clock;
pub use error::{LedgerError, LedgerResult, OracleError, OracleResult, SettlementError};
pub use events::EventSink;
pub use oracle::PriceOracle;
pub use settlement::{SettlementExecutor, SettlementReceipt};
