use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{AccountId, CollateralType, Position};
use crate::risk::CollateralRatio;
use crate::values::{Amount, Price, Timestamp};

/// Position flagged for liquidation by a monitor scan
///
/// Carries no timestamp or identifier so that repeated scans over unchanged
/// data yield equal events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationEvent {
    pub owner: AccountId,
    pub collateral_type: CollateralType,
    pub collateral_amount: Amount,
    pub debt_amount: Amount,
    /// Spot price used for the evaluation
    pub price: Price,
    /// Collateral value in USD
    pub collateral_value: Decimal,
    pub ratio: CollateralRatio,
    /// USD collateral value missing to restore the minimum ratio
    pub shortfall: Decimal,
    /// `shortfall` expressed in collateral units
    pub collateral_shortfall: Amount,
}

/// Spot price change published by an oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub collateral_type: CollateralType,
    pub price: Price,
    pub timestamp: Timestamp,
}

/// Ledger mutations, published for display and notification consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "camelCase")]
pub enum LedgerEvent {
    PositionOpened(Position),
    PositionUpdated(Position),
    PositionClosed(Position),
    PoolFunded { amount: Amount, balance: Amount },
    PoolDrained { amount: Amount, balance: Amount },
}

impl LedgerEvent {
    /// Owner affected by the event, if any
    pub fn owner(&self) -> Option<&AccountId> {
        match self {
            LedgerEvent::PositionOpened(p)
            | LedgerEvent::PositionUpdated(p)
            | LedgerEvent::PositionClosed(p) => Some(&p.owner),
            LedgerEvent::PoolFunded { .. } | LedgerEvent::PoolDrained { .. } => None,
        }
    }
}
