use debtpool_core::{
    CollateralRatio, PERCENT, Position, Price, PriceSnapshot, RiskAssessment, RiskTier,
};
use debtpool_ports::{OracleError, OracleResult};
use log::trace;
use rust_decimal::Decimal;

use crate::config::RiskConfig;

/// Stateless collateralization evaluator
#[derive(Debug, Clone, Default)]
pub struct RiskEvaluator {
    config: RiskConfig,
}

impl RiskEvaluator {
    /// Create an evaluator with default thresholds (150% / 200%)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Get the risk configuration
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Minimum ratio (percent) a position must keep
    pub fn minimum_ratio(&self) -> Decimal {
        self.config.min_collateral_ratio
    }

    /// Evaluate a position against a spot price for its collateral
    ///
    /// Values too large for `Decimal` saturate at `Decimal::MAX`; use
    /// [`checked_evaluate`](Self::checked_evaluate) to reject them instead.
    pub fn evaluate(&self, position: &Position, price: Price) -> RiskAssessment {
        let collateral_value = position.collateral_value(price);
        let ratio = CollateralRatio::from_values(collateral_value, position.debt_value());
        self.assessment(position, price, collateral_value, ratio)
    }

    /// Evaluate a position, `None` if its collateral value or ratio overflows
    pub fn checked_evaluate(&self, position: &Position, price: Price) -> Option<RiskAssessment> {
        let collateral_value = position.checked_collateral_value(price)?;
        let ratio = CollateralRatio::checked_from_values(collateral_value, position.debt_value())?;
        Some(self.assessment(position, price, collateral_value, ratio))
    }

    fn assessment(
        &self,
        position: &Position,
        price: Price,
        collateral_value: Decimal,
        ratio: CollateralRatio,
    ) -> RiskAssessment {
        let debt_value = position.debt_value();
        let tier = self.tier(ratio);

        trace!(
            "Evaluated {}: collateral={} {} @ {} debt={} ratio={} tier={}",
            position.owner,
            position.collateral_amount,
            position.collateral_type,
            price,
            debt_value,
            ratio,
            tier
        );

        RiskAssessment {
            ratio,
            tier,
            collateral_value,
            debt_value,
        }
    }

    /// Evaluate using the price for the position's collateral in `prices`
    pub fn evaluate_with(
        &self,
        position: &Position,
        prices: &PriceSnapshot,
    ) -> OracleResult<RiskAssessment> {
        let price = prices
            .get(position.collateral_type)
            .ok_or(OracleError::PriceUnavailable(position.collateral_type))?;
        Ok(self.evaluate(position, price))
    }

    /// Classify a ratio into a risk tier
    pub fn tier(&self, ratio: CollateralRatio) -> RiskTier {
        RiskTier::classify(
            ratio,
            self.config.min_collateral_ratio,
            self.config.low_risk_ratio,
        )
    }

    /// True when `ratio` satisfies the minimum collateralization
    pub fn meets_minimum(&self, ratio: CollateralRatio) -> bool {
        ratio.at_least(self.config.min_collateral_ratio)
    }

    /// USD collateral value missing to bring the position back to the minimum
    ///
    /// Zero for positions already at or above the minimum.
    pub fn shortfall(&self, position: &Position, price: Price) -> Decimal {
        let required = position
            .debt_value()
            .saturating_mul(self.minimum_fraction());
        required
            .saturating_sub(position.collateral_value(price))
            .max(Decimal::ZERO)
    }

    /// Spot price at which the position reaches the minimum ratio
    ///
    /// `None` when there is no debt or no collateral to price.
    pub fn liquidation_price(&self, position: &Position) -> Option<Price> {
        if !position.has_debt() || position.collateral_amount.is_zero() {
            return None;
        }
        let required = position.debt_value().saturating_mul(self.minimum_fraction());
        Some(
            required
                .checked_div(position.collateral_amount)
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Minimum ratio as a fraction, e.g. 1.5 for 150%
    fn minimum_fraction(&self) -> Decimal {
        self.config.min_collateral_ratio / PERCENT
    }
}
