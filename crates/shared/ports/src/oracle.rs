use debtpool_core::{CollateralType, Price, PriceSnapshot};

use crate::error::OracleResult;

/// Port for spot price sources
///
/// Implementations may be a cached feed, an on-chain oracle adapter or a
/// fixed table for tests. Reads must be cheap and non-blocking: the ledger
/// consults the oracle while validating a position update.
pub trait PriceOracle: Send + Sync {
    /// Current USD spot price for one unit of `collateral`
    fn spot_price(&self, collateral: CollateralType) -> OracleResult<Price>;

    /// All known prices, read at one instant
    fn snapshot(&self) -> OracleResult<PriceSnapshot>;
}
