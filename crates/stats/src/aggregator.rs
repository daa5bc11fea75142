use debtpool_core::{Amount, GlobalStats, Position, PriceSnapshot};
use debtpool_ports::OracleResult;
use debtpool_risk::RiskEvaluator;
use log::debug;

use crate::accumulator::StatsAccumulator;

/// Computes platform-wide statistics from positions and one price snapshot
#[derive(Debug, Clone, Default)]
pub struct GlobalStatsAggregator {
    evaluator: RiskEvaluator,
}

impl GlobalStatsAggregator {
    pub fn new(evaluator: RiskEvaluator) -> Self {
        Self { evaluator }
    }

    /// Fold positions into an accumulator
    ///
    /// Fails if any position's collateral has no price in `prices`.
    pub fn accumulate<'a>(
        &self,
        positions: impl IntoIterator<Item = &'a Position>,
        prices: &PriceSnapshot,
    ) -> OracleResult<StatsAccumulator> {
        let mut acc = StatsAccumulator::new();
        for position in positions {
            let assessment = self.evaluator.evaluate_with(position, prices)?;
            acc.add(position, &assessment);
        }
        Ok(acc)
    }

    /// Aggregate all positions into global statistics
    pub fn aggregate<'a>(
        &self,
        positions: impl IntoIterator<Item = &'a Position>,
        prices: &PriceSnapshot,
        liquidation_pool_balance: Amount,
    ) -> OracleResult<GlobalStats> {
        let acc = self.accumulate(positions, prices)?;
        let stats = acc.finish(liquidation_pool_balance);
        debug!(
            "Aggregated {} positions: collateral {} debt {} health {}",
            stats.position_count, stats.total_collateral_value, stats.total_debt, stats.system_health
        );
        Ok(stats)
    }
}
