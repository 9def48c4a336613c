//! Time sources for the kitchen.
//!
//! Every timestamp in the crate is microseconds since the Unix epoch (`i64`).
//! The [`OrderManager`](crate::kitchen::OrderManager) reads "now" through the [`Clock`]
//! trait so tests can drive time by hand.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::MICROS_PER_SEC;

/// Source of "now", in microseconds since the Unix epoch.
pub trait Clock: Debug + Send + Sync {
    fn now_micros(&self) -> i64;
}

/// Wall-clock time.
///
/// Anchored to the system clock once at construction and advanced by the tokio
/// clock afterwards, so it stays monotonic and follows `tokio::time::pause`/`advance`
/// in tests.
#[derive(Debug, Clone)]
pub struct SystemClock {
    anchor_micros: i64,
    origin: tokio::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let anchor_micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_micros() as i64)
            .unwrap_or_default();
        Self {
            anchor_micros,
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_micros(&self) -> i64 {
        self.anchor_micros + self.origin.elapsed().as_micros() as i64
    }
}

/// A hand-driven clock for deterministic tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn at_micros(start: i64) -> Self {
        Self {
            current: Arc::new(AtomicI64::new(start)),
        }
    }

    pub fn set_micros(&self, micros: i64) {
        self.current.store(micros, Ordering::SeqCst);
    }

    /// Moves time forward and returns the new reading.
    pub fn advance_micros(&self, micros: i64) -> i64 {
        debug_assert!(micros >= 0, "time must not go backwards");
        self.current.fetch_add(micros, Ordering::SeqCst) + micros
    }

    pub fn advance_secs(&self, secs: i64) -> i64 {
        self.advance_micros(secs * MICROS_PER_SEC)
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shares_time_between_clones() {
        let clock = ManualClock::at_micros(10);
        let other = clock.clone();
        assert_eq!(clock.advance_secs(2), 2 * MICROS_PER_SEC + 10);
        assert_eq!(other.now_micros(), 2 * MICROS_PER_SEC + 10);
        other.set_micros(0);
        assert_eq!(clock.now_micros(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_follows_tokio_time() {
        let clock = SystemClock::new();
        let before = clock.now_micros();
        tokio::time::advance(std::time::Duration::from_secs(3)).await;
        assert!(clock.now_micros() - before >= 3 * MICROS_PER_SEC);
    }
}
