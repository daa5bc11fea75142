use debtpool_core::CollateralType;
use serde::{Deserialize, Serialize};

/// Position store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Collateral types that may back new positions
    #[serde(default = "default_enabled_collateral")]
    pub enabled_collateral: Vec<CollateralType>,

    /// Accept deposits and repayments on under-collateralized positions as
    /// long as the ratio does not get worse
    #[serde(default = "default_allow_risk_reducing_updates")]
    pub allow_risk_reducing_updates: bool,
}

fn default_enabled_collateral() -> Vec<CollateralType> {
    // BTC and ETH are listed but not yet open for deposits
    vec![CollateralType::Stx]
}

fn default_allow_risk_reducing_updates() -> bool {
    true
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled_collateral: default_enabled_collateral(),
            allow_risk_reducing_updates: default_allow_risk_reducing_updates(),
        }
    }
}

impl LedgerConfig {
    /// Enable every known collateral type
    pub fn all_collateral() -> Self {
        Self {
            enabled_collateral: CollateralType::ALL.to_vec(),
            ..Default::default()
        }
    }

    pub fn is_enabled(&self, collateral: CollateralType) -> bool {
        self.enabled_collateral.contains(&collateral)
    }
}
