use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::PERCENT;

/// Collateralization ratio expressed as a percentage
///
/// Ordering puts every finite ratio below `Infinite`, which is what a
/// position without debt evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollateralRatio {
    /// collateral value / debt value × 100
    Finite(Decimal),
    /// No debt outstanding
    Infinite,
}

impl CollateralRatio {
    /// Compute the ratio from USD values
    ///
    /// A ratio too large for `Decimal` saturates at `Decimal::MAX`.
    pub fn from_values(collateral_value: Decimal, debt_value: Decimal) -> Self {
        Self::checked_from_values(collateral_value, debt_value).unwrap_or_else(|| {
            let pct = collateral_value
                .checked_div(debt_value)
                .map_or(Decimal::MAX, |r| r.saturating_mul(PERCENT));
            CollateralRatio::Finite(pct)
        })
    }

    /// Compute the ratio, `None` when it does not fit in a `Decimal`
    pub fn checked_from_values(collateral_value: Decimal, debt_value: Decimal) -> Option<Self> {
        if debt_value.is_zero() {
            return Some(CollateralRatio::Infinite);
        }
        collateral_value
            .checked_mul(PERCENT)
            .and_then(|v| v.checked_div(debt_value))
            .map(CollateralRatio::Finite)
    }

    /// Finite percentage, `None` for `Infinite`
    pub fn as_percent(&self) -> Option<Decimal> {
        match self {
            CollateralRatio::Finite(pct) => Some(*pct),
            CollateralRatio::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, CollateralRatio::Infinite)
    }

    /// True when the ratio is at least `percent`
    pub fn at_least(&self, percent: Decimal) -> bool {
        match self {
            CollateralRatio::Finite(pct) => *pct >= percent,
            CollateralRatio::Infinite => true,
        }
    }
}

impl std::fmt::Display for CollateralRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollateralRatio::Finite(pct) => write!(f, "{:.1}%", pct),
            CollateralRatio::Infinite => write!(f, "∞"),
        }
    }
}
