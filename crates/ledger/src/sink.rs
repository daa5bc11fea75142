use debtpool_core::LedgerEvent;
use debtpool_ports::EventSink;
use tokio::sync::broadcast;

/// Broadcast-based ledger event sink
///
/// Fans ledger events out to any number of subscribers. Sending never blocks;
/// slow subscribers observe `Lagged` and skip ahead.
#[derive(Clone)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<LedgerEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to all ledger events
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventSink for BroadcastEventSink {
    fn send(&self, event: LedgerEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_subscribe_and_receive() {
        let sink = BroadcastEventSink::new(16);
        let mut rx = sink.subscribe();
        assert_eq!(sink.subscriber_count(), 1);

        sink.send(LedgerEvent::PoolFunded {
            amount: dec!(100),
            balance: dec!(100),
        });

        let received = rx.recv().await.unwrap();
        assert!(matches!(received, LedgerEvent::PoolFunded { .. }));
    }

    #[test]
    fn test_send_without_subscribers() {
        let sink = BroadcastEventSink::default();
        sink.send(LedgerEvent::PoolDrained {
            amount: dec!(1),
            balance: dec!(0),
        });
    }
}
