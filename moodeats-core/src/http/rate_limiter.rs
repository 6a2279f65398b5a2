//! Per-host request spacing.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Per-host rate limiter. A zero delay disables it.
pub struct RateLimiter {
    /// Minimum delay between requests to the same host.
    min_delay: Duration,
    /// Earliest start time of the next request, per host.
    next_slot: DashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            next_slot: DashMap::new(),
        }
    }

    /// A limiter that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.min_delay.is_zero()
    }

    /// Wait if necessary before making a request to this host.
    ///
    /// Each caller reserves its own slot under the entry lock; the lock is
    /// released before sleeping.
    pub async fn wait(&self, host: &str) {
        if !self.is_enabled() {
            return;
        }

        let slot = {
            let now = Instant::now();
            let mut next = self.next_slot.entry(host.to_string()).or_insert(now);
            let slot = (*next).max(now);
            *next = slot + self.min_delay;
            slot
        };

        let delay = slot.saturating_duration_since(Instant::now());
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }

    /// Number of hosts seen so far.
    pub fn tracked_hosts(&self) -> usize {
        self.next_slot.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::disabled()
    }
}
