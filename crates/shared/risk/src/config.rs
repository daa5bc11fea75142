use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds used to classify positions (percentages)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Minimum ratio enforced on create/update; below it a position is liquidatable
    #[serde(default = "default_min_collateral_ratio")]
    pub min_collateral_ratio: Decimal,

    /// Ratio at or above which a position is low risk
    #[serde(default = "default_low_risk_ratio")]
    pub low_risk_ratio: Decimal,
}

fn default_min_collateral_ratio() -> Decimal {
    dec!(150)
}

fn default_low_risk_ratio() -> Decimal {
    dec!(200)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskConfigError {
    #[error("Minimum collateral ratio must be positive, got {0}")]
    NonPositiveMinimum(Decimal),

    #[error("Low-risk ratio {low_risk} must not be below minimum {minimum}")]
    LowRiskBelowMinimum { low_risk: Decimal, minimum: Decimal },
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            min_collateral_ratio: default_min_collateral_ratio(),
            low_risk_ratio: default_low_risk_ratio(),
        }
    }
}

impl RiskConfig {
    /// Create with a custom minimum, keeping the default low-risk threshold
    /// when it stays consistent
    pub fn with_minimum(min_collateral_ratio: Decimal) -> Self {
        Self {
            min_collateral_ratio,
            low_risk_ratio: default_low_risk_ratio().max(min_collateral_ratio),
        }
    }

    pub fn validate(&self) -> Result<(), RiskConfigError> {
        if self.min_collateral_ratio <= Decimal::ZERO {
            return Err(RiskConfigError::NonPositiveMinimum(self.min_collateral_ratio));
        }
        if self.low_risk_ratio < self.min_collateral_ratio {
            return Err(RiskConfigError::LowRiskBelowMinimum {
                low_risk: self.low_risk_ratio,
                minimum: self.min_collateral_ratio,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RiskConfig::default();
        assert_eq!(config.min_collateral_ratio, dec!(150));
        assert_eq!(config.low_risk_ratio, dec!(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = RiskConfig {
            min_collateral_ratio: dec!(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RiskConfigError::NonPositiveMinimum(_))
        ));

        let config = RiskConfig {
            min_collateral_ratio: dec!(180),
            low_risk_ratio: dec!(160),
        };
        assert!(matches!(
            config.validate(),
            Err(RiskConfigError::LowRiskBelowMinimum { .. })
        ));
    }

    #[test]
    fn test_with_minimum_keeps_order() {
        let config = RiskConfig::with_minimum(dec!(250));
        assert_eq!(config.low_risk_ratio, dec!(250));
        assert!(config.validate().is_ok());
    }
}
