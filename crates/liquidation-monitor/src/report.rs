use debtpool_core::{AccountId, LiquidationEvent, Timestamp};
use rust_decimal::Decimal;

/// Outcome of one monitor scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Liquidatable positions, ordered by owner
    pub flagged: Vec<LiquidationEvent>,
    /// Owners skipped because their collateral had no price
    pub unpriced: Vec<AccountId>,
    /// Positions examined
    pub scanned: usize,
    /// When the price snapshot was taken
    pub taken_at: Option<Timestamp>,
}

impl ScanReport {
    pub fn is_clear(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn is_flagged(&self, owner: &AccountId) -> bool {
        self.flagged.iter().any(|e| &e.owner == owner)
    }

    /// Total USD shortfall across flagged positions
    pub fn total_shortfall(&self) -> Decimal {
        self.flagged
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.shortfall))
    }
}
