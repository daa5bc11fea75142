use debtpool_liquidation_monitor::MonitorError;
use debtpool_ports::{LedgerError, OracleError};
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced while bootstrapping or running the system
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Monitor error: {0}")]
    Monitor(#[from] MonitorError),

    #[error("Task failed: {0}")]
    Task(String),
}

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;
