use debtpool_core::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Signed change applied to a position
///
/// Positive `collateral` deposits, negative withdraws. Positive `debt`
/// borrows, negative repays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDelta {
    pub collateral: Decimal,
    pub debt: Decimal,
}

impl PositionDelta {
    pub fn new(collateral: Decimal, debt: Decimal) -> Self {
        Self { collateral, debt }
    }

    /// Add collateral
    pub fn deposit(amount: Amount) -> Self {
        Self::new(amount, Decimal::ZERO)
    }

    /// Remove collateral
    pub fn withdraw(amount: Amount) -> Self {
        Self::new(-amount, Decimal::ZERO)
    }

    /// Take on more debt
    pub fn borrow(amount: Amount) -> Self {
        Self::new(Decimal::ZERO, amount)
    }

    /// Pay back debt
    pub fn repay(amount: Amount) -> Self {
        Self::new(Decimal::ZERO, -amount)
    }

    /// Combine with another delta, `None` on overflow
    pub fn checked_and(self, other: PositionDelta) -> Option<Self> {
        Some(Self::new(
            self.collateral.checked_add(other.collateral)?,
            self.debt.checked_add(other.debt)?,
        ))
    }

    /// Neither removes collateral nor adds debt
    pub fn is_risk_reducing(&self) -> bool {
        self.collateral >= Decimal::ZERO && self.debt <= Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.collateral.is_zero() && self.debt.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors() {
        assert_eq!(PositionDelta::deposit(dec!(5)), PositionDelta::new(dec!(5), dec!(0)));
        assert_eq!(PositionDelta::withdraw(dec!(5)), PositionDelta::new(dec!(-5), dec!(0)));
        assert_eq!(PositionDelta::borrow(dec!(7)), PositionDelta::new(dec!(0), dec!(7)));
        assert_eq!(PositionDelta::repay(dec!(7)), PositionDelta::new(dec!(0), dec!(-7)));
    }

    #[test]
    fn test_risk_reducing() {
        assert!(PositionDelta::deposit(dec!(1)).is_risk_reducing());
        assert!(PositionDelta::repay(dec!(1)).is_risk_reducing());
        assert!(!PositionDelta::withdraw(dec!(1)).is_risk_reducing());
        assert!(!PositionDelta::borrow(dec!(1)).is_risk_reducing());
        assert!(
            !PositionDelta::deposit(dec!(10))
                .checked_and(PositionDelta::borrow(dec!(1)))
                .unwrap()
                .is_risk_reducing()
        );
    }

    #[test]
    fn test_checked_and_overflow() {
        assert_eq!(
            PositionDelta::deposit(Decimal::MAX).checked_and(PositionDelta::deposit(dec!(1))),
            None
        );
        assert_eq!(
            PositionDelta::withdraw(dec!(5)).checked_and(PositionDelta::repay(dec!(3))),
            Some(PositionDelta::new(dec!(-5), dec!(-3)))
        );
    }
}
