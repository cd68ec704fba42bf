// SPDX-License-Identifier: Apache-2.0

//! Time sources for backoff and elapsed-time computation.
//!
//! Production code uses [`SystemClock`]; tests use [`FakeClock`], whose time
//! only moves when something sleeps on it, so rate-limit waits are
//! observable and instantaneous.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A swappable source of "now" and "sleep".
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Deterministic clock for tests.
///
/// `sleep` records the requested duration and advances the clock by it
/// instead of suspending.
#[derive(Debug, Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeClockState>>,
}

#[derive(Debug)]
struct FakeClockState {
    now: DateTime<Utc>,
    slept: Vec<Duration>,
}

impl FakeClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeClockState {
                now,
                slept: Vec::new(),
            })),
        }
    }

    /// Durations passed to `sleep`, in call order.
    #[must_use]
    pub fn slept(&self) -> Vec<Duration> {
        self.lock().slept.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeClockState> {
        self.inner.lock().expect("clock state lock poisoned")
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.lock().now
    }

    async fn sleep(&self, duration: Duration) {
        let mut state = self.lock();
        let delta =
            chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
        state.now += delta;
        state.slept.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().expect("valid RFC3339 instant")
    }

    #[tokio::test]
    async fn fake_clock_advances_on_sleep() {
        let clock = FakeClock::at(instant("2026-08-01T00:00:00Z"));
        clock.sleep(Duration::from_secs(90)).await;

        assert_eq!(clock.now(), instant("2026-08-01T00:01:30Z"));
        assert_eq!(clock.slept(), vec![Duration::from_secs(90)]);
    }

    #[tokio::test]
    async fn fake_clock_records_every_sleep() {
        let clock = FakeClock::at(instant("2026-08-01T00:00:00Z"));
        clock.sleep(Duration::from_secs(1)).await;
        clock.sleep(Duration::from_secs(2)).await;

        assert_eq!(
            clock.slept(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn system_clock_does_not_go_backwards() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
