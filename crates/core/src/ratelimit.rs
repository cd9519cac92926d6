//! Fixed-window request rate limiting.
//!
//! A fixed window keeps one counter per client key and resets it when the
//! window elapses, as opposed to sliding-window or token-bucket schemes.
//! The store is behind a trait so a multi-process deployment can swap the
//! process-local map for a shared-cache-backed implementation without
//! touching the algorithm.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Outcome of recording one request against a client's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// True once the window's budget is exhausted.
    pub exceeded: bool,
    /// When the current window ends; callers report this as a retry hint.
    pub reset_at: DateTime<Utc>,
}

/// Fixed-window parameters.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::milliseconds(60_000),
            max_requests: 60,
        }
    }
}

/// Storage seam for rate-limit windows.
///
/// `check` records the request and reports the decision in one step; the
/// caller supplies `now` so implementations stay deterministic under test.
#[async_trait]
pub trait RateLimiterStore: Send + Sync {
    async fn check(&self, key: &str, now: DateTime<Utc>) -> RateLimitDecision;
}

#[derive(Debug)]
struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Process-local fixed-window counter.
///
/// Windows live only in this process's memory: they are not shared across
/// server processes and do not survive a restart.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiterStore for InMemoryRateLimiter {
    async fn check(&self, key: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let mut windows = self.windows.lock().expect("rate limit window map poisoned");
        let window = windows.entry(key.to_owned()).or_insert(Window {
            count: 0,
            reset_at: now + self.config.window,
        });
        // A request strictly after the window's end starts a fresh window;
        // a request at exactly `reset_at` still lands in the old one.
        if now > window.reset_at {
            window.count = 0;
            window.reset_at = now + self.config.window;
        }
        window.count += 1;
        let exceeded = window.count > self.config.max_requests;
        if exceeded {
            debug!(key, count = window.count, "rate limit exceeded");
        }
        RateLimitDecision {
            exceeded,
            reset_at: window.reset_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn limiter(max_requests: u32) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig {
            window: Duration::milliseconds(60_000),
            max_requests,
        })
    }

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn allows_up_to_max_requests_in_one_window() {
        let store = limiter(60);
        let now = start_time();
        for _ in 0..60 {
            let decision = store.check("client-a", now).await;
            assert!(!decision.exceeded);
        }
        let decision = store.check("client-a", now).await;
        assert!(decision.exceeded);
    }

    #[tokio::test]
    async fn reports_reset_time_one_window_ahead() {
        let store = limiter(60);
        let now = start_time();
        let decision = store.check("client-a", now).await;
        assert_eq!(decision.reset_at, now + Duration::milliseconds(60_000));
    }

    #[tokio::test]
    async fn request_strictly_after_reset_starts_a_fresh_window() {
        let store = limiter(2);
        let now = start_time();
        store.check("client-a", now).await;
        store.check("client-a", now).await;
        assert!(store.check("client-a", now).await.exceeded);

        let after_reset = now + Duration::milliseconds(60_001);
        let decision = store.check("client-a", after_reset).await;
        assert!(!decision.exceeded);
        assert_eq!(
            decision.reset_at,
            after_reset + Duration::milliseconds(60_000)
        );
    }

    #[tokio::test]
    async fn request_at_exact_reset_time_counts_in_old_window() {
        let store = limiter(1);
        let now = start_time();
        let first = store.check("client-a", now).await;
        assert!(!first.exceeded);

        let at_reset = first.reset_at;
        let decision = store.check("client-a", at_reset).await;
        assert!(decision.exceeded);
    }

    #[tokio::test]
    async fn keys_are_tracked_independently() {
        let store = limiter(1);
        let now = start_time();
        assert!(!store.check("client-a", now).await.exceeded);
        assert!(store.check("client-a", now).await.exceeded);
        assert!(!store.check("client-b", now).await.exceeded);
    }
}
