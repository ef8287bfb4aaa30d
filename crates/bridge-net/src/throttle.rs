//! Broadcast throttling: at most one broadcast per configured interval,
//! shared identically by the TCP and WebSocket transports (spec §4.5, §4.6,
//! §8 property 8).

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Minimum broadcast interval accepted by configuration (spec §6).
pub const MIN_INTERVAL_MS: u64 = 5;

#[derive(Debug)]
pub struct BroadcastThrottle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl BroadcastThrottle {
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        let clamped = interval_ms.max(MIN_INTERVAL_MS);
        BroadcastThrottle {
            interval: Duration::from_millis(clamped),
            last: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Rate implied by the configured interval, for the broadcast
    /// document's `broadcast_rate_hz` field.
    #[must_use]
    pub fn rate_hz(&self) -> f64 {
        1000.0 / self.interval.as_millis() as f64
    }

    /// Returns `true` if a broadcast should happen now, and records that
    /// moment as the last broadcast time. Returns `false` (without side
    /// effects) if called again before `interval` has elapsed.
    pub fn try_tick(&self) -> bool {
        let now = Instant::now();
        let mut last = self.last.lock().expect("throttle mutex poisoned");
        match *last {
            Some(previous) if now.duration_since(previous) < self.interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn clamps_interval_to_the_configured_minimum() {
        let throttle = BroadcastThrottle::new(1);
        assert_eq!(throttle.interval(), Duration::from_millis(MIN_INTERVAL_MS));
    }

    #[test]
    fn only_one_tick_fires_within_the_window() {
        let throttle = BroadcastThrottle::new(50);
        assert!(throttle.try_tick());
        assert!(!throttle.try_tick());
        sleep(Duration::from_millis(60));
        assert!(throttle.try_tick());
    }
}
