use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::CollateralType;
use crate::risk::{CollateralRatio, RiskTier};
use crate::values::{Amount, PERCENT};

/// Number of positions per risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl RiskDistribution {
    pub fn record(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Low => self.low += 1,
            RiskTier::Medium => self.medium += 1,
            RiskTier::High => self.high += 1,
        }
    }

    pub fn merge(&mut self, other: &RiskDistribution) {
        self.low += other.low;
        self.medium += other.medium;
        self.high += other.high;
    }

    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }

    pub fn count(&self, tier: RiskTier) -> u64 {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Medium => self.medium,
            RiskTier::High => self.high,
        }
    }

    /// Share of positions in `tier`, as a percentage (0 when empty)
    pub fn percentage(&self, tier: RiskTier) -> Decimal {
        let total = self.total();
        if total == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.count(tier)) * PERCENT / Decimal::from(total)
    }
}

/// Platform-wide totals derived from all positions
///
/// Never stored: recomputed from the position store on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Sum of collateral values in USD
    pub total_collateral_value: Decimal,
    /// Sum of outstanding debt in USD
    pub total_debt: Decimal,
    /// Funds available to absorb liquidations
    pub liquidation_pool_balance: Decimal,
    /// Aggregate collateralization ratio
    pub system_health: CollateralRatio,
    /// Number of open positions
    pub position_count: u64,
    /// Collateral locked per asset, in native units
    pub collateral_by_type: BTreeMap<CollateralType, Amount>,
    /// Mean ratio over positions carrying debt, `None` when there are none
    pub average_collateral_ratio: Option<Decimal>,
    /// Total debt as a percentage of total collateral value
    pub utilization: Decimal,
    /// Positions per risk tier
    pub risk_distribution: RiskDistribution,
}

impl GlobalStats {
    /// Number of positions currently eligible for liquidation
    pub fn active_liquidations(&self) -> u64 {
        self.risk_distribution.high
    }
}
