use debtpool_ports::OracleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Liquidation event channel closed")]
    ChannelClosed,
}

pub type MonitorResult<T> = std::result::Result<T, MonitorError>;
