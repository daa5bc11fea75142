//! DebtPool Risk
//!
//! Pure collateralization arithmetic shared by the ledger, the liquidation
//! monitor and the statistics aggregator.
//!
//! | ratio (collateral value / debt × 100) | tier |
//! |---------------------------------------|------|
//! | >= 200 (or no debt)                   | Low |
//! | 150 ..< 200                           | Medium |
//! | < 150                                 | High (liquidatable) |

mod config;
mod evaluator;

pub use config::{RiskConfig, RiskConfigError};
pub use evaluator::RiskEvaluator;
