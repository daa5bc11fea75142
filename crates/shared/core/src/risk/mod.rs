mod ratio;
mod tier;

pub use ratio::CollateralRatio;
pub use tier::{RiskAssessment, RiskTier};
