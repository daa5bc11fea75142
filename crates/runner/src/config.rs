//! Configuration loading for the DebtPool runner
//!
//! A single JSON document describes:
//! - Risk thresholds and enabled collateral
//! - Liquidation monitor cadence
//! - Initial spot prices and seed positions
//! - The simulated price feed
//!
//! Every field has a default, so `{}` is a valid configuration.

use debtpool_core::{Amount, CollateralType, Price};
use debtpool_ledger::LedgerConfig;
use debtpool_liquidation_monitor::MonitorConfig;
use debtpool_risk::RiskConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// Environment variable overriding `monitor.scan_interval_ms`
pub const ENV_SCAN_INTERVAL_MS: &str = "DEBTPOOL_SCAN_INTERVAL_MS";
/// Environment variable overriding `duration_ms`
pub const ENV_DURATION_MS: &str = "DEBTPOOL_DURATION_MS";

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPoolConfig {
    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Initial spot prices in USD
    #[serde(default = "default_prices")]
    pub prices: BTreeMap<CollateralType, Price>,

    /// Starting balance of the liquidation pool
    #[serde(default = "default_liquidation_pool_balance")]
    pub liquidation_pool_balance: Amount,

    /// Positions opened at startup
    #[serde(default = "default_positions")]
    pub positions: Vec<SeedPosition>,

    #[serde(default)]
    pub price_feed: PriceFeedConfig,

    /// How long a simulation runs
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_prices() -> BTreeMap<CollateralType, Price> {
    BTreeMap::from([(CollateralType::Stx, dec!(1))])
}

fn default_liquidation_pool_balance() -> Amount {
    dec!(45000)
}

fn default_positions() -> Vec<SeedPosition> {
    vec![SeedPosition {
        owner: "SP1234...ABC567".to_string(),
        collateral_amount: dec!(1500),
        debt_amount: dec!(800),
        collateral_type: CollateralType::Stx,
    }]
}

fn default_duration_ms() -> u64 {
    10_000
}

impl Default for DebtPoolConfig {
    fn default() -> Self {
        Self {
            risk: RiskConfig::default(),
            ledger: LedgerConfig::default(),
            monitor: MonitorConfig::default(),
            prices: default_prices(),
            liquidation_pool_balance: default_liquidation_pool_balance(),
            positions: default_positions(),
            price_feed: PriceFeedConfig::default(),
            duration_ms: default_duration_ms(),
        }
    }
}

impl DebtPoolConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(ENV_SCAN_INTERVAL_MS) {
            self.monitor.scan_interval_ms = parse_millis(ENV_SCAN_INTERVAL_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_DURATION_MS) {
            self.duration_ms = parse_millis(ENV_DURATION_MS, &value)?;
        }
        Ok(())
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.risk
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.ledger.enabled_collateral.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one collateral type must be enabled".to_string(),
            ));
        }
        if self.monitor.scan_interval_ms == 0 {
            return Err(ConfigError::Invalid("scan_interval_ms must be positive".to_string()));
        }
        if self.monitor.event_capacity == 0 {
            return Err(ConfigError::Invalid("event_capacity must be positive".to_string()));
        }
        if let Some((collateral, price)) = self.prices.iter().find(|(_, p)| **p <= Decimal::ZERO) {
            return Err(ConfigError::Invalid(format!(
                "price for {} must be positive, got {}",
                collateral, price
            )));
        }
        if self.liquidation_pool_balance < Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "liquidation_pool_balance must not be negative".to_string(),
            ));
        }
        for seed in &self.positions {
            if seed.collateral_amount < Decimal::ZERO || seed.debt_amount < Decimal::ZERO {
                return Err(ConfigError::Invalid(format!(
                    "seed position for {} has negative amounts",
                    seed.owner
                )));
            }
        }
        self.price_feed.validate()
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} must be an integer, got '{}'", key, value)))
}

/// Position opened during bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPosition {
    pub owner: String,
    pub collateral_amount: Amount,
    pub debt_amount: Amount,
    #[serde(default = "default_collateral_type")]
    pub collateral_type: CollateralType,
}

fn default_collateral_type() -> CollateralType {
    CollateralType::Stx
}

/// Random-walk price feed settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeedConfig {
    /// Maximum relative move per tick (0.02 = 2%)
    #[serde(default = "default_volatility")]
    pub volatility: Decimal,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seed for reproducible runs; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_volatility() -> Decimal {
    dec!(0.02)
}

fn default_tick_interval_ms() -> u64 {
    1_000
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            volatility: default_volatility(),
            tick_interval_ms: default_tick_interval_ms(),
            seed: None,
        }
    }
}

impl PriceFeedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.volatility < Decimal::ZERO || self.volatility >= Decimal::ONE {
            return Err(ConfigError::Invalid(format!(
                "volatility must be in [0, 1), got {}",
                self.volatility
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = DebtPoolConfig::from_json("{}").unwrap();
        assert_eq!(config, DebtPoolConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.prices.get(&CollateralType::Stx), Some(&dec!(1)));
        assert_eq!(config.risk.min_collateral_ratio, dec!(150));
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "risk": { "min_collateral_ratio": "150", "low_risk_ratio": "200" },
            "ledger": { "enabled_collateral": ["STX", "BTC"] },
            "monitor": { "scan_interval_ms": 250 },
            "prices": { "STX": "1.25", "BTC": "60000" },
            "liquidation_pool_balance": "125000",
            "positions": [
                { "owner": "SP1", "collateral_amount": "0.5", "debt_amount": "10000", "collateral_type": "BTC" },
                { "owner": "SP2", "collateral_amount": "2000", "debt_amount": "900" }
            ],
            "price_feed": { "volatility": "0.05", "seed": 42 },
            "duration_ms": 2000
        }"#;

        let config = DebtPoolConfig::from_json(json).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.ledger.is_enabled(CollateralType::Btc));
        assert!(config.ledger.allow_risk_reducing_updates);
        assert_eq!(config.monitor.scan_interval_ms, 250);
        assert_eq!(config.monitor.event_capacity, 256);
        assert_eq!(config.prices.get(&CollateralType::Btc), Some(&dec!(60000)));
        assert_eq!(config.positions.len(), 2);
        assert_eq!(config.positions[1].collateral_type, CollateralType::Stx);
        assert_eq!(config.price_feed.seed, Some(42));
        assert_eq!(config.price_feed.tick_interval_ms, 1_000);
        assert_eq!(config.duration_ms, 2000);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            DebtPoolConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DebtPoolConfig::from_json(r#"{ "prices": { "DOGE": "1" } }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            DebtPoolConfig::from_file("/nonexistent/debtpool.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = DebtPoolConfig::default();
        config.prices.insert(CollateralType::Eth, dec!(0));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = DebtPoolConfig::default();
        config.risk.low_risk_ratio = dec!(100);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = DebtPoolConfig::default();
        config.price_feed.volatility = dec!(1.5);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = DebtPoolConfig::default();
        config.ledger.enabled_collateral.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            (ENV_SCAN_INTERVAL_MS, "50".to_string()),
            (ENV_DURATION_MS, " 750 ".to_string()),
        ]);
        let mut config = DebtPoolConfig::default();
        config
            .apply_overrides(|key| vars.get(key).cloned())
            .unwrap();

        assert_eq!(config.monitor.scan_interval_ms, 50);
        assert_eq!(config.duration_ms, 750);

        let result = config.apply_overrides(|key| {
            (key == ENV_DURATION_MS).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
