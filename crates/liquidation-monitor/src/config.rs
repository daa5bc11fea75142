use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Liquidation monitor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Time between periodic scans
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,

    /// Capacity of the liquidation event channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_scan_interval_ms() -> u64 {
    5_000
}

fn default_event_capacity() -> usize {
    256
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: default_scan_interval_ms(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl MonitorConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms.max(1))
    }
}
