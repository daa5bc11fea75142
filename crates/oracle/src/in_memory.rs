use debtpool_clock::SystemClock;
use debtpool_core::{CollateralType, Price, PriceSnapshot, PriceUpdate};
use debtpool_ports::{Clock, OracleError, OracleResult, PriceOracle};
use log::{debug, warn};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::broadcast;

/// In-memory price oracle
///
/// Holds the latest spot price per collateral type. All prices live behind a
/// single lock so that [`PriceOracle::snapshot`] is atomic.
pub struct InMemoryPriceOracle {
    prices: RwLock<PriceSnapshot>,
    clock: Arc<dyn Clock>,
    update_tx: broadcast::Sender<PriceUpdate>,
}

impl InMemoryPriceOracle {
    /// Create an empty oracle using the system clock
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock::new()))
    }

    /// Create an empty oracle with a custom clock
    pub fn with_clock(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let (update_tx, _) = broadcast::channel(capacity.max(1));
        Self {
            prices: RwLock::new(PriceSnapshot::new()),
            clock,
            update_tx,
        }
    }

    /// Create an oracle seeded with initial prices
    pub fn with_prices(
        capacity: usize,
        clock: Arc<dyn Clock>,
        prices: impl IntoIterator<Item = (CollateralType, Price)>,
    ) -> OracleResult<Self> {
        let oracle = Self::with_clock(capacity, clock);
        for (collateral, price) in prices {
            oracle.set_price(collateral, price)?;
        }
        Ok(oracle)
    }

    /// Subscribe to price updates
    pub fn subscribe(&self) -> broadcast::Receiver<PriceUpdate> {
        self.update_tx.subscribe()
    }

    /// Publish a new spot price
    ///
    /// Non-positive prices are rejected and leave the previous price in place.
    pub fn set_price(&self, collateral: CollateralType, price: Price) -> OracleResult<PriceUpdate> {
        if price <= Decimal::ZERO {
            warn!("Rejected price {} for {}", price, collateral);
            return Err(OracleError::InvalidPrice { collateral, price });
        }

        let timestamp = self.clock.now();
        {
            let mut prices = self.prices.write();
            prices.insert(collateral, price);
            prices.taken_at = Some(timestamp);
        }

        let update = PriceUpdate {
            collateral_type: collateral,
            price,
            timestamp,
        };
        debug!("Price update: {} = {}", collateral, price);

        // Ignore send errors (no subscribers)
        let _ = self.update_tx.send(update);
        Ok(update)
    }

    /// Drop the price for a collateral type, making it unavailable
    pub fn clear_price(&self, collateral: CollateralType) -> Option<Price> {
        let mut prices = self.prices.write();
        let previous = prices.remove(collateral);
        if previous.is_some() {
            warn!("Price for {} cleared", collateral);
        }
        previous
    }
}

impl PriceOracle for InMemoryPriceOracle {
    fn spot_price(&self, collateral: CollateralType) -> OracleResult<Price> {
        self.prices
            .read()
            .get(collateral)
            .ok_or(OracleError::PriceUnavailable(collateral))
    }

    fn snapshot(&self) -> OracleResult<PriceSnapshot> {
        let mut snapshot = self.prices.read().clone();
        snapshot.taken_at = Some(self.clock.now());
        Ok(snapshot)
    }
}
