use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::CollateralType;

/// Spot price in USD per unit of collateral
pub type Price = Decimal;

/// Amount of an asset (collateral units or USD debt)
pub type Amount = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Multiplier turning a fraction into a percentage
pub const PERCENT: Decimal = dec!(100);

/// Spot prices for every collateral type, read atomically from an oracle
///
/// A scan or aggregation uses one snapshot for all positions so that every
/// position in a cycle is valued against the same prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    prices: BTreeMap<CollateralType, Price>,
    /// When the snapshot was taken
    pub taken_at: Option<Timestamp>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_price(mut self, collateral: CollateralType, price: Price) -> Self {
        self.prices.insert(collateral, price);
        self
    }

    pub fn insert(&mut self, collateral: CollateralType, price: Price) {
        self.prices.insert(collateral, price);
    }

    pub fn remove(&mut self, collateral: CollateralType) -> Option<Price> {
        self.prices.remove(&collateral)
    }

    pub fn get(&self, collateral: CollateralType) -> Option<Price> {
        self.prices.get(&collateral).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CollateralType, Price)> + '_ {
        self.prices.iter().map(|(c, p)| (*c, *p))
    }
}

impl FromIterator<(CollateralType, Price)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (CollateralType, Price)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
            taken_at: None,
        }
    }
}
