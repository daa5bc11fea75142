use debtpool_core::{AccountId, CollateralRatio, CollateralType};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by a price oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("No spot price available for {0}")]
    PriceUnavailable(CollateralType),

    #[error("Invalid spot price {price} for {collateral}")]
    InvalidPrice {
        collateral: CollateralType,
        price: Decimal,
    },
}

pub type OracleResult<T> = std::result::Result<T, OracleError>;

/// Domain-level errors for position operations
///
/// Every variant is recoverable: the request is rejected and stored state is
/// left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient collateralization for {owner}: ratio {ratio} below minimum {minimum}%")]
    InsufficientCollateralization {
        owner: AccountId,
        ratio: CollateralRatio,
        minimum: Decimal,
    },

    #[error("No position found for {0}")]
    NotFound(AccountId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Position already exists for {0}")]
    AlreadyExists(AccountId),

    #[error("Collateral type {0} is not enabled")]
    UnsupportedCollateral(CollateralType),

    #[error("Insufficient pool balance: requested {requested}, available {available}")]
    InsufficientPoolBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors reported by a settlement executor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Settlement rejected: {0}")]
    Rejected(String),

    #[error("Settlement executor unavailable: {0}")]
    Unavailable(String),
}
