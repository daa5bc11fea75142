mod account;
mod collateral;
mod position;

pub use account::AccountId;
pub use collateral::{CollateralType, ParseCollateralTypeError};
pub use position::Position;
