use debtpool_core::{Amount, LedgerEvent};
use debtpool_ports::{EventSink, LedgerError, LedgerResult};
use log::{debug, info};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Funds set aside to absorb liquidations
pub struct LiquidationPool {
    balance: Mutex<Amount>,
    events: Arc<dyn EventSink>,
}

impl LiquidationPool {
    pub fn new(initial_balance: Amount) -> Self {
        Self {
            balance: Mutex::new(initial_balance.max(Decimal::ZERO)),
            events: Arc::new(()),
        }
    }

    /// Publish pool changes to `events`
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn balance(&self) -> Amount {
        *self.balance.lock()
    }

    /// Add funds, returning the new balance
    pub fn fund(&self, amount: Amount) -> LedgerResult<Amount> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "pool funding must be positive, got {}",
                amount
            )));
        }

        let mut balance = self.balance.lock();
        let new_balance = balance.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("pool funding of {} overflows the balance", amount))
        })?;
        *balance = new_balance;
        info!("Liquidation pool funded with {} (balance {})", amount, new_balance);
        self.events.send(LedgerEvent::PoolFunded {
            amount,
            balance: new_balance,
        });
        Ok(new_balance)
    }

    /// Withdraw funds, returning the new balance
    pub fn drain(&self, amount: Amount) -> LedgerResult<Amount> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "pool drain must be positive, got {}",
                amount
            )));
        }

        let mut balance = self.balance.lock();
        if amount > *balance {
            return Err(LedgerError::InsufficientPoolBalance {
                requested: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        let new_balance = *balance;
        debug!("Liquidation pool drained by {} (balance {})", amount, new_balance);
        self.events.send(LedgerEvent::PoolDrained {
            amount,
            balance: new_balance,
        });
        Ok(new_balance)
    }
}

impl Default for LiquidationPool {
    fn default() -> Self {
        Self::new(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BroadcastEventSink;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fund_and_drain() {
        let pool = LiquidationPool::new(dec!(125000));

        assert_eq!(pool.fund(dec!(5000)).unwrap(), dec!(130000));
        assert_eq!(pool.drain(dec!(30000)).unwrap(), dec!(100000));
        assert_eq!(pool.balance(), dec!(100000));
    }

    #[test]
    fn test_drain_beyond_balance() {
        let pool = LiquidationPool::new(dec!(10));

        let err = pool.drain(dec!(11)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientPoolBalance {
                requested: dec!(11),
                available: dec!(10),
            }
        );
        assert_eq!(pool.balance(), dec!(10));
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let pool = LiquidationPool::default();
        assert!(matches!(pool.fund(dec!(0)), Err(LedgerError::InvalidAmount(_))));
        assert!(matches!(pool.drain(dec!(-1)), Err(LedgerError::InvalidAmount(_))));
    }

    #[test]
    fn test_fund_overflow_keeps_balance() {
        let pool = LiquidationPool::new(dec!(45000));
        assert!(matches!(
            pool.fund(Decimal::MAX),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert_eq!(pool.balance(), dec!(45000));
    }

    #[tokio::test]
    async fn test_publishes_events() {
        let sink = Arc::new(BroadcastEventSink::new(16));
        let mut rx = sink.subscribe();
        let pool = LiquidationPool::new(dec!(0)).with_event_sink(sink);

        pool.fund(dec!(50)).unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            LedgerEvent::PoolFunded {
                amount: dec!(50),
                balance: dec!(50),
            }
        );
    }
}
