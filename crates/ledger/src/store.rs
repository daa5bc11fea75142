use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use debtpool_core::{
    AccountId, Amount, CollateralType, LedgerEvent, Position, Price, RiskAssessment,
};
use debtpool_ports::{Clock, EventSink, LedgerError, LedgerResult, PriceOracle};
use debtpool_risk::RiskEvaluator;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::config::LedgerConfig;
use crate::delta::PositionDelta;

/// Thread-safe store of collateralized debt positions
///
/// One position per owner. Creation and updates are rejected when the
/// resulting collateralization ratio falls below the evaluator's minimum;
/// a rejected call leaves the stored record untouched.
pub struct PositionStore {
    positions: DashMap<AccountId, Position>,
    oracle: Arc<dyn PriceOracle>,
    clock: Arc<dyn Clock>,
    evaluator: RiskEvaluator,
    config: LedgerConfig,
    events: Arc<dyn EventSink>,
}

impl PositionStore {
    pub fn new(oracle: Arc<dyn PriceOracle>, clock: Arc<dyn Clock>, evaluator: RiskEvaluator) -> Self {
        Self {
            positions: DashMap::new(),
            oracle,
            clock,
            evaluator,
            config: LedgerConfig::default(),
            events: Arc::new(()),
        }
    }

    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish ledger mutations to `events`
    ///
    /// Events are sent while the owner's entry guard is held, so the sink
    /// must not call back into the store.
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn evaluator(&self) -> &RiskEvaluator {
        &self.evaluator
    }

    pub fn oracle(&self) -> &Arc<dyn PriceOracle> {
        &self.oracle
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Open a new position
    pub fn create(
        &self,
        owner: AccountId,
        collateral_amount: Amount,
        debt_amount: Amount,
        collateral_type: CollateralType,
    ) -> LedgerResult<Position> {
        check_non_negative("collateral", collateral_amount)?;
        check_non_negative("debt", debt_amount)?;
        if collateral_amount.is_zero() && debt_amount.is_zero() {
            return Err(LedgerError::InvalidAmount(
                "a position needs collateral or debt".to_string(),
            ));
        }
        if !self.config.is_enabled(collateral_type) {
            return Err(LedgerError::UnsupportedCollateral(collateral_type));
        }

        match self.positions.entry(owner) {
            Entry::Occupied(entry) => Err(LedgerError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let price = self.oracle.spot_price(collateral_type)?;
                let position = Position::new(
                    entry.key().clone(),
                    collateral_amount,
                    collateral_type,
                    debt_amount,
                    self.clock.now(),
                );

                let assessment = self.checked_evaluate(&position, price)?;
                if !self.evaluator.meets_minimum(assessment.ratio) {
                    warn!(
                        "Rejected position for {}: ratio {} below {}%",
                        position.owner,
                        assessment.ratio,
                        self.evaluator.minimum_ratio()
                    );
                    return Err(self.insufficient(&position.owner, assessment));
                }

                entry.insert(position.clone());
                info!(
                    "Position opened: {} {} {} / debt {} (ratio {})",
                    position.owner,
                    position.collateral_amount,
                    position.collateral_type,
                    position.debt_amount,
                    assessment.ratio
                );
                self.events.send(LedgerEvent::PositionOpened(position.clone()));
                Ok(position)
            }
        }
    }

    /// Apply a delta to an existing position
    ///
    /// When the update leaves both collateral and debt at zero the position
    /// is closed and removed; the returned record then carries zero amounts.
    pub fn update(&self, owner: &AccountId, delta: PositionDelta) -> LedgerResult<Position> {
        let mut entry = match self.positions.entry(owner.clone()) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => return Err(LedgerError::NotFound(owner.clone())),
        };

        let current = entry.get();
        let (Some(collateral_amount), Some(debt_amount)) = (
            current.collateral_amount.checked_add(delta.collateral),
            current.debt_amount.checked_add(delta.debt),
        ) else {
            return Err(LedgerError::InvalidAmount(format!(
                "update of {} collateral / {} debt overflows position {}",
                delta.collateral, delta.debt, owner
            )));
        };

        if collateral_amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "cannot withdraw {} {}, only {} deposited",
                -delta.collateral, current.collateral_type, current.collateral_amount
            )));
        }
        if debt_amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "cannot repay {}, only {} outstanding",
                -delta.debt, current.debt_amount
            )));
        }

        let now = self.clock.now();

        if collateral_amount.is_zero() && debt_amount.is_zero() {
            let mut closed = entry.remove();
            closed.collateral_amount = Decimal::ZERO;
            closed.debt_amount = Decimal::ZERO;
            closed.last_update = now;
            info!("Position closed: {}", closed.owner);
            self.events.send(LedgerEvent::PositionClosed(closed.clone()));
            return Ok(closed);
        }

        let price = self.oracle.spot_price(current.collateral_type)?;
        let mut next = current.clone();
        next.collateral_amount = collateral_amount;
        next.debt_amount = debt_amount;
        next.last_update = now;

        let after = self.checked_evaluate(&next, price)?;
        if !self.evaluator.meets_minimum(after.ratio) {
            let before = self.evaluator.evaluate(current, price);
            let tolerated = self.config.allow_risk_reducing_updates
                && delta.is_risk_reducing()
                && after.ratio >= before.ratio;
            if !tolerated {
                warn!(
                    "Rejected update for {}: ratio {} below {}%",
                    owner,
                    after.ratio,
                    self.evaluator.minimum_ratio()
                );
                return Err(self.insufficient(owner, after));
            }
            debug!(
                "Accepted risk-reducing update for {} still under minimum ({} -> {})",
                owner, before.ratio, after.ratio
            );
        }

        *entry.get_mut() = next.clone();
        debug!(
            "Position updated: {} collateral {} debt {} (ratio {})",
            owner, next.collateral_amount, next.debt_amount, after.ratio
        );
        self.events.send(LedgerEvent::PositionUpdated(next.clone()));
        Ok(next)
    }

    /// Repay all debt and withdraw all collateral in one step
    ///
    /// Runs under the owner's entry guard: a concurrent update either lands
    /// first and is swept out with the close, or finds no position.
    pub fn close(&self, owner: &AccountId) -> LedgerResult<Position> {
        let entry = match self.positions.entry(owner.clone()) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => return Err(LedgerError::NotFound(owner.clone())),
        };

        let mut closed = entry.remove();
        debug!(
            "Closing {}: returning {} {}, settling debt {}",
            owner, closed.collateral_amount, closed.collateral_type, closed.debt_amount
        );
        closed.collateral_amount = Decimal::ZERO;
        closed.debt_amount = Decimal::ZERO;
        closed.last_update = self.clock.now();
        info!("Position closed: {}", closed.owner);
        self.events.send(LedgerEvent::PositionClosed(closed.clone()));
        Ok(closed)
    }

    pub fn get(&self, owner: &AccountId) -> LedgerResult<Position> {
        self.positions
            .get(owner)
            .map(|p| p.value().clone())
            .ok_or_else(|| LedgerError::NotFound(owner.clone()))
    }

    /// Remove a position, e.g. after an external liquidation settled it
    pub fn remove(&self, owner: &AccountId) -> LedgerResult<Position> {
        let (_, position) = self
            .positions
            .remove(owner)
            .ok_or_else(|| LedgerError::NotFound(owner.clone()))?;
        info!("Position removed: {}", owner);
        self.events.send(LedgerEvent::PositionClosed(position.clone()));
        Ok(position)
    }

    /// Assess a position against the current spot price of its collateral
    pub fn assess(&self, position: &Position) -> LedgerResult<RiskAssessment> {
        let price = self.oracle.spot_price(position.collateral_type)?;
        Ok(self.evaluator.evaluate(position, price))
    }

    /// Copies of every position, ordered by owner
    ///
    /// Each record is consistent on its own; the set is not a point-in-time
    /// view of the whole store.
    pub fn snapshot(&self) -> Vec<Position> {
        let mut positions: Vec<Position> =
            self.positions.iter().map(|e| e.value().clone()).collect();
        positions.sort_by(|a, b| a.owner.cmp(&b.owner));
        positions
    }

    pub fn contains(&self, owner: &AccountId) -> bool {
        self.positions.contains_key(owner)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn checked_evaluate(&self, position: &Position, price: Price) -> LedgerResult<RiskAssessment> {
        self.evaluator.checked_evaluate(position, price).ok_or_else(|| {
            LedgerError::InvalidAmount(format!(
                "{} {} at {} is too large to value",
                position.collateral_amount, position.collateral_type, price
            ))
        })
    }

    fn insufficient(&self, owner: &AccountId, assessment: RiskAssessment) -> LedgerError {
        LedgerError::InsufficientCollateralization {
            owner: owner.clone(),
            ratio: assessment.ratio,
            minimum: self.evaluator.minimum_ratio(),
        }
    }
}

fn check_non_negative(what: &str, amount: Amount) -> LedgerResult<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "{} must not be negative, got {}",
            what, amount
        )));
    }
    Ok(())
}
