//! Price Feed - Simulated spot prices for the oracle
//!
//! Each tick moves every known price by a bounded random step:
//! `price * (1 + volatility * u)` with `u` uniform in `[-1, 1)`.
//! Seeded runs are reproducible.

use debtpool_core::{Price, PriceUpdate};
use debtpool_oracle::InMemoryPriceOracle;
use debtpool_ports::PriceOracle;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::config::PriceFeedConfig;

/// Decimal places kept on simulated prices
const PRICE_SCALE: u32 = 6;

/// Random-walk price generator pushing into an [`InMemoryPriceOracle`]
pub struct PriceFeedSimulator {
    oracle: Arc<InMemoryPriceOracle>,
    config: PriceFeedConfig,
    rng: StdRng,
}

impl PriceFeedSimulator {
    pub fn new(oracle: Arc<InMemoryPriceOracle>, config: PriceFeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            oracle,
            config,
            rng,
        }
    }

    /// Next price for one random step from `current`
    fn step(&mut self, current: Price) -> Price {
        let volatility = self.config.volatility.to_f64().unwrap_or(0.0);
        let change: f64 = self.rng.gen_range(-1.0..1.0);
        let multiplier = 1.0 + volatility * change;

        current
            .to_f64()
            .and_then(|p| Decimal::from_f64(p * multiplier))
            .map(|p| p.round_dp(PRICE_SCALE))
            .filter(|p| *p > Decimal::ZERO)
            .unwrap_or(current)
    }

    /// Move every price once and publish the results
    pub fn tick(&mut self) -> Vec<PriceUpdate> {
        let snapshot = match self.oracle.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Price feed could not read oracle: {}", e);
                return Vec::new();
            }
        };

        let mut updates = Vec::with_capacity(snapshot.len());
        for (collateral, current) in snapshot.iter() {
            let next = self.step(current);
            match self.oracle.set_price(collateral, next) {
                Ok(update) => {
                    debug!("{} {} -> {}", collateral, current, next);
                    updates.push(update);
                }
                Err(e) => warn!("Price feed update rejected: {}", e),
            }
        }
        updates
    }

    /// Tick on a fixed interval until `shutdown` flips
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut ticker =
            tokio::time::interval(Duration::from_millis(self.config.tick_interval_ms.max(1)));
        // The first tick fires immediately; prices start at their configured values
        ticker.tick().await;

        let mut ticks = 0;
        info!("Price feed started (volatility {})", self.config.volatility);

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick();
                    ticks += 1;
                }
            }
        }

        info!("Price feed stopped after {} ticks", ticks);
        ticks
    }
}
