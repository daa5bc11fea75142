//! DebtPool Statistics
//!
//! Folds positions into [`GlobalStats`](debtpool_core::GlobalStats).
//!
//! Aggregation goes through a mergeable [`StatsAccumulator`]: partial
//! accumulators built over any partition of the positions, merged in any
//! order, finish to the same result as a single pass.

mod accumulator;
mod aggregator;

pub use accumulator::StatsAccumulator;
pub use aggregator::GlobalStatsAggregator;
