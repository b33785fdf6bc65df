use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Every this many attempts, buckets with no live timestamps are dropped.
const SWEEP_EVERY: u64 = 256;

/// Sliding-window limiter keyed by client.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: Arc<DashMap<String, Vec<Instant>>>,
    attempts: Arc<AtomicU64>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            buckets: Arc::new(DashMap::new()),
            attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an attempt for `key`; `false` once the window is full.
    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let allowed = {
            let mut entry = self.buckets.entry(key.to_string()).or_default();
            entry.retain(|instant| now.duration_since(*instant) < self.window);

            if entry.len() as u32 >= self.max_requests {
                false
            } else {
                entry.push(now);
                true
            }
        };

        // The entry guard must be gone before sweeping the map.
        if (self.attempts.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.sweep();
        }
        allowed
    }

    /// Drop every client whose window has fully expired.
    fn sweep(&self) {
        let now = Instant::now();
        let window = self.window;
        self.buckets.retain(|_, attempts| {
            attempts.retain(|instant| now.duration_since(*instant) < window);
            !attempts.is_empty()
        });
    }

    pub fn retry_after_secs(&self) -> u64 {
        self.window.as_secs().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl RateLimiter {
        fn tracked_clients(&self) -> usize {
            self.buckets.len()
        }
    }

    #[test]
    fn rejects_after_limit_within_window() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2);
        assert!(limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.1"));
        assert!(!limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.2"));
    }

    #[test]
    fn window_expiry_frees_slots() {
        let limiter = RateLimiter::new(Duration::from_millis(0), 1);
        assert!(limiter.allow("client"));
        assert!(limiter.allow("client"));
        assert_eq!(limiter.retry_after_secs(), 1);
    }

    #[test]
    fn expired_clients_are_forgotten() {
        let limiter = RateLimiter::new(Duration::from_millis(0), 5);
        for n in 0..10_000 {
            limiter.allow(&format!("198.51.100.{n}"));
        }
        assert!(limiter.tracked_clients() < 10_000);

        limiter.sweep();
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[test]
    fn sweep_keeps_clients_inside_their_window() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 5);
        assert!(limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.2"));

        limiter.sweep();
        assert_eq!(limiter.tracked_clients(), 2);
    }
}
