//! DebtPool Oracle
//!
//! Spot price cache implementing the [`PriceOracle`](debtpool_ports::PriceOracle)
//! port. Prices are pushed in by a feed (simulated or an external adapter)
//! and every change is broadcast as a [`PriceUpdate`](debtpool_core::PriceUpdate)
//! so that the liquidation monitor can rescan on price moves.

mod in_memory;

pub use in_memory::InMemoryPriceOracle;
