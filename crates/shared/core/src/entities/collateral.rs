use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Asset accepted as collateral
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollateralType {
    /// Stacks
    Stx,
    /// Bitcoin
    Btc,
    /// Ether
    Eth,
}

impl CollateralType {
    pub const ALL: [CollateralType; 3] = [CollateralType::Stx, CollateralType::Btc, CollateralType::Eth];

    /// Ticker symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            CollateralType::Stx => "STX",
            CollateralType::Btc => "BTC",
            CollateralType::Eth => "ETH",
        }
    }

    /// Human-readable asset name
    pub fn name(&self) -> &'static str {
        match self {
            CollateralType::Stx => "Stacks",
            CollateralType::Btc => "Bitcoin",
            CollateralType::Eth => "Ether",
        }
    }
}

impl std::fmt::Display for CollateralType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Error returned when a collateral tag is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCollateralTypeError(pub String);

impl std::fmt::Display for ParseCollateralTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown collateral type '{}'", self.0)
    }
}

impl std::error::Error for ParseCollateralTypeError {}

impl FromStr for CollateralType {
    type Err = ParseCollateralTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STX" => Ok(CollateralType::Stx),
            "BTC" => Ok(CollateralType::Btc),
            "ETH" => Ok(CollateralType::Eth),
            _ => Err(ParseCollateralTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("stx".parse::<CollateralType>(), Ok(CollateralType::Stx));
        assert_eq!(" BTC ".parse::<CollateralType>(), Ok(CollateralType::Btc));
        assert!("DOGE".parse::<CollateralType>().is_err());
    }

    #[test]
    fn test_serde_uses_ticker() {
        let json = serde_json::to_string(&CollateralType::Eth).unwrap();
        assert_eq!(json, "\"ETH\"");
        let parsed: CollateralType = serde_json::from_str("\"STX\"").unwrap();
        assert_eq!(parsed, CollateralType::Stx);
    }
}
