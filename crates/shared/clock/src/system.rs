use chrono::Utc;
use debtpool_core::Timestamp;
use debtpool_ports::Clock;

/// Wall-clock time source, used outside tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_wall_clock() {
        let clock = SystemClock::new();
        let before = Utc::now();
        let now = clock.now();
        let after = Utc::now();

        assert!(before <= now && now <= after);
        assert_eq!(clock.name(), "SystemClock");
    }
}
