use debtpool_core::LedgerEvent;

/// Sink for ledger events, usable from synchronous code
///
/// Ledger mutations happen under per-account guards, so publishing must never
/// block or await.
pub trait EventSink: Send + Sync {
    /// Publish an event; delivery is best effort
    fn send(&self, event: LedgerEvent);
}

/// Sink that discards every event
impl EventSink for () {
    fn send(&self, _event: LedgerEvent) {}
}
