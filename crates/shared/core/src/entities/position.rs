use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, CollateralType};
use crate::values::{Amount, Price, Timestamp};

/// A collateralized debt position
///
/// Collateral is held in units of `collateral_type`; debt is denominated in
/// USD. One position exists per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Account that owns this position
    pub owner: AccountId,

    /// Collateral locked, in units of `collateral_type`
    pub collateral_amount: Amount,

    /// Asset backing the position
    pub collateral_type: CollateralType,

    /// Outstanding debt in USD
    pub debt_amount: Amount,

    /// When the position was opened
    pub created_at: Timestamp,

    /// Last mutation time
    pub last_update: Timestamp,
}

impl Position {
    /// Create a new position
    pub fn new(
        owner: AccountId,
        collateral_amount: Amount,
        collateral_type: CollateralType,
        debt_amount: Amount,
        now: Timestamp,
    ) -> Self {
        Self {
            owner,
            collateral_amount,
            collateral_type,
            debt_amount,
            created_at: now,
            last_update: now,
        }
    }

    /// USD value of the collateral at the given spot price
    ///
    /// Saturates at `Decimal::MAX`.
    pub fn collateral_value(&self, price: Price) -> Decimal {
        self.collateral_amount.saturating_mul(price)
    }

    /// USD value of the collateral, `None` on overflow
    pub fn checked_collateral_value(&self, price: Price) -> Option<Decimal> {
        self.collateral_amount.checked_mul(price)
    }

    /// Debt value in USD
    pub fn debt_value(&self) -> Decimal {
        self.debt_amount
    }

    pub fn has_debt(&self) -> bool {
        self.debt_amount > Decimal::ZERO
    }

    /// True once both collateral and debt are fully withdrawn/repaid
    pub fn is_empty(&self) -> bool {
        self.collateral_amount.is_zero() && self.debt_amount.is_zero()
    }
}
