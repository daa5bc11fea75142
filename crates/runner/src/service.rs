//! Request/response handlers for position management
//!
//! Amounts arrive as strings straight from form input and are parsed here;
//! anything that is not a non-negative decimal is rejected with
//! `LedgerError::InvalidAmount` before the ledger is touched.

use debtpool_core::{AccountId, Amount, CollateralType, GlobalStats, Position, RiskAssessment};
use debtpool_ledger::{LiquidationPool, PositionDelta, PositionStore};
use debtpool_ports::{LedgerError, LedgerResult};
use debtpool_stats::GlobalStatsAggregator;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Position operation requested by an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PositionRequest {
    Open {
        owner: String,
        collateral_amount: String,
        debt_amount: String,
        collateral_type: String,
    },
    Deposit {
        owner: String,
        amount: String,
    },
    Withdraw {
        owner: String,
        amount: String,
    },
    Borrow {
        owner: String,
        amount: String,
    },
    Repay {
        owner: String,
        amount: String,
    },
    /// Repay all debt and withdraw all collateral
    Close {
        owner: String,
    },
    Get {
        owner: String,
    },
}

/// Position state after a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionResponse {
    pub position: Position,
    /// `None` once the position has been closed
    pub assessment: Option<RiskAssessment>,
}

/// Front door for display and wallet collaborators
pub struct DebtPoolService {
    store: Arc<PositionStore>,
    pool: Arc<LiquidationPool>,
    aggregator: GlobalStatsAggregator,
}

impl DebtPoolService {
    pub fn new(store: Arc<PositionStore>, pool: Arc<LiquidationPool>) -> Self {
        let aggregator = GlobalStatsAggregator::new(store.evaluator().clone());
        Self {
            store,
            pool,
            aggregator,
        }
    }

    pub fn store(&self) -> &Arc<PositionStore> {
        &self.store
    }

    pub fn pool(&self) -> &Arc<LiquidationPool> {
        &self.pool
    }

    /// Handle a position request
    pub fn handle(&self, request: PositionRequest) -> LedgerResult<PositionResponse> {
        debug!("Handling request: {:?}", request);
        let position = match request {
            PositionRequest::Open {
                owner,
                collateral_amount,
                debt_amount,
                collateral_type,
            } => {
                let collateral_amount = parse_amount("collateral amount", &collateral_amount)?;
                let debt_amount = parse_amount("debt amount", &debt_amount)?;
                let collateral_type = CollateralType::from_str(&collateral_type)
                    .map_err(|e| LedgerError::InvalidAmount(e.to_string()))?;
                self.store.create(
                    parse_owner(&owner)?,
                    collateral_amount,
                    debt_amount,
                    collateral_type,
                )?
            }
            PositionRequest::Deposit { owner, amount } => {
                let delta = PositionDelta::deposit(parse_amount("amount", &amount)?);
                self.store.update(&parse_owner(&owner)?, delta)?
            }
            PositionRequest::Withdraw { owner, amount } => {
                let delta = PositionDelta::withdraw(parse_amount("amount", &amount)?);
                self.store.update(&parse_owner(&owner)?, delta)?
            }
            PositionRequest::Borrow { owner, amount } => {
                let delta = PositionDelta::borrow(parse_amount("amount", &amount)?);
                self.store.update(&parse_owner(&owner)?, delta)?
            }
            PositionRequest::Repay { owner, amount } => {
                let delta = PositionDelta::repay(parse_amount("amount", &amount)?);
                self.store.update(&parse_owner(&owner)?, delta)?
            }
            PositionRequest::Close { owner } => self.store.close(&parse_owner(&owner)?)?,
            PositionRequest::Get { owner } => self.store.get(&parse_owner(&owner)?)?,
        };

        let assessment = if self.store.contains(&position.owner) {
            Some(self.store.assess(&position)?)
        } else {
            None
        };
        Ok(PositionResponse {
            position,
            assessment,
        })
    }

    /// Platform-wide statistics at current prices
    pub fn global_stats(&self) -> LedgerResult<GlobalStats> {
        let prices = self.store.oracle().snapshot()?;
        let positions = self.store.snapshot();
        Ok(self
            .aggregator
            .aggregate(&positions, &prices, self.pool.balance())?)
    }
}

fn parse_owner(owner: &str) -> LedgerResult<AccountId> {
    let owner = owner.trim();
    if owner.is_empty() {
        return Err(LedgerError::InvalidAmount("owner is required".to_string()));
    }
    Ok(AccountId::new(owner))
}

/// Parse a non-negative decimal from user input
pub fn parse_amount(field: &str, input: &str) -> LedgerResult<Amount> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LedgerError::InvalidAmount(format!("{} is required", field)));
    }
    let amount = Decimal::from_str(input)
        .map_err(|_| LedgerError::InvalidAmount(format!("{} '{}' is not a number", field, input)))?;
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "{} must not be negative, got {}",
            field, amount
        )));
    }
    Ok(amount)
}
