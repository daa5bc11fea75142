use debtpool_core::{
    Amount, CollateralRatio, CollateralType, GlobalStats, PERCENT, Position, RiskAssessment,
    RiskDistribution,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Running totals over a set of assessed positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsAccumulator {
    total_collateral_value: Decimal,
    total_debt: Decimal,
    position_count: u64,
    collateral_by_type: BTreeMap<CollateralType, Amount>,
    /// Sum and count of finite ratios, for the average
    ratio_sum: Decimal,
    ratio_count: u64,
    risk_distribution: RiskDistribution,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one position and its assessment in
    ///
    /// Sums saturate at `Decimal::MAX`, which keeps folding order-independent.
    pub fn add(&mut self, position: &Position, assessment: &RiskAssessment) {
        self.total_collateral_value = self
            .total_collateral_value
            .saturating_add(assessment.collateral_value);
        self.total_debt = self.total_debt.saturating_add(assessment.debt_value);
        self.position_count += 1;
        self.add_collateral(position.collateral_type, position.collateral_amount);
        if let Some(pct) = assessment.ratio.as_percent() {
            self.ratio_sum = self.ratio_sum.saturating_add(pct);
            self.ratio_count += 1;
        }
        self.risk_distribution.record(assessment.tier);
    }

    /// Combine another partial aggregate into this one
    pub fn merge(&mut self, other: &StatsAccumulator) {
        self.total_collateral_value = self
            .total_collateral_value
            .saturating_add(other.total_collateral_value);
        self.total_debt = self.total_debt.saturating_add(other.total_debt);
        self.position_count += other.position_count;
        for (collateral, amount) in &other.collateral_by_type {
            self.add_collateral(*collateral, *amount);
        }
        self.ratio_sum = self.ratio_sum.saturating_add(other.ratio_sum);
        self.ratio_count += other.ratio_count;
        self.risk_distribution.merge(&other.risk_distribution);
    }

    fn add_collateral(&mut self, collateral: CollateralType, amount: Amount) {
        let total = self
            .collateral_by_type
            .entry(collateral)
            .or_insert(Decimal::ZERO);
        *total = total.saturating_add(amount);
    }

    pub fn position_count(&self) -> u64 {
        self.position_count
    }

    /// Derive the final statistics
    pub fn finish(self, liquidation_pool_balance: Amount) -> GlobalStats {
        let system_health =
            CollateralRatio::from_values(self.total_collateral_value, self.total_debt);

        let utilization = if self.total_collateral_value.is_zero() {
            Decimal::ZERO
        } else {
            self.total_debt
                .checked_mul(PERCENT)
                .and_then(|d| d.checked_div(self.total_collateral_value))
                .unwrap_or_else(|| {
                    self.total_debt
                        .checked_div(self.total_collateral_value)
                        .map_or(Decimal::MAX, |r| r.saturating_mul(PERCENT))
                })
        };

        let average_collateral_ratio = if self.ratio_count == 0 {
            None
        } else {
            Some(self.ratio_sum / Decimal::from(self.ratio_count))
        };

        GlobalStats {
            total_collateral_value: self.total_collateral_value,
            total_debt: self.total_debt,
            liquidation_pool_balance,
            system_health,
            position_count: self.position_count,
            collateral_by_type: self.collateral_by_type,
            average_collateral_ratio,
            utilization,
            risk_distribution: self.risk_distribution,
        }
    }
}
