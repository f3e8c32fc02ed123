use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use crate::clock::Clock;
use crate::metrics::TRACKED_CLIENTS;

pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
pub const RATE_LIMIT_MAX: usize = 30;
// Tracked client count above which stale clients get swept
pub const SWEEP_THRESHOLD: usize = 1000;

/// Sliding window limiter keyed by client identifier.
///
/// Every call records a timestamp, including calls that end up rejected, so a
/// client that keeps hammering while blocked keeps its own window full.
pub struct RateLimiter {
    clients: DashMap<String, Vec<Instant>>, // client id -> request timestamps, oldest first
    clock: Arc<dyn Clock>,
    window: Duration,
    max_requests: usize,
    sweep_threshold: usize,
}

impl RateLimiter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(clock, RATE_LIMIT_WINDOW, RATE_LIMIT_MAX, SWEEP_THRESHOLD)
    }

    pub fn with_limits(
        clock: Arc<dyn Clock>,
        window: Duration,
        max_requests: usize,
        sweep_threshold: usize,
    ) -> Self {
        Self {
            clients: DashMap::new(),
            clock,
            window,
            max_requests,
            sweep_threshold,
        }
    }

    /// Records a request for `client_id` and reports whether it is within quota.
    pub fn check_and_record(&self, client_id: &str) -> bool {
        let now = self.clock.now();

        // the shard guard must be released before len() or the sweep touch the map
        let allowed = {
            let mut timestamps = self.clients.entry(client_id.to_string()).or_default();
            timestamps.retain(|&t| self.is_fresh(now, t));
            timestamps.push(now);
            timestamps.len() <= self.max_requests
        };

        if self.clients.len() > self.sweep_threshold {
            self.sweep(now);
        }
        TRACKED_CLIENTS.set(self.tracked_clients() as f64);

        allowed
    }

    // Drop every client whose timestamps have all left the window
    fn sweep(&self, now: Instant) {
        let before = self.clients.len();
        self.clients
            .retain(|_, timestamps| timestamps.iter().any(|&t| self.is_fresh(now, t)));
        debug!(
            evicted = before.saturating_sub(self.clients.len()),
            remaining = self.clients.len(),
            "rate limiter sweep complete"
        );
    }

    fn is_fresh(&self, now: Instant, t: Instant) -> bool {
        now.saturating_duration_since(t) < self.window
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}
