use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CollateralRatio;

/// Risk classification bucket derived from the collateralization ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// ratio >= low-risk threshold (200% by default)
    Low,
    /// minimum <= ratio < low-risk threshold
    Medium,
    /// ratio < minimum, eligible for liquidation
    High,
}

impl RiskTier {
    /// Bucket a ratio given the minimum and low-risk thresholds (percentages)
    pub fn classify(ratio: CollateralRatio, minimum: Decimal, low_risk: Decimal) -> Self {
        if ratio.at_least(low_risk) {
            RiskTier::Low
        } else if ratio.at_least(minimum) {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn is_liquidatable(&self) -> bool {
        matches!(self, RiskTier::High)
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// Result of evaluating a position against a spot price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub ratio: CollateralRatio,
    pub tier: RiskTier,
    /// Collateral value in USD
    pub collateral_value: Decimal,
    /// Debt value in USD
    pub debt_value: Decimal,
}
