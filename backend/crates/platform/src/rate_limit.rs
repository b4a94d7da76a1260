//! Rate Limiting Infrastructure
//!
//! Fixed-window counters. The window a request falls into is
//! `floor(now_ms / window_ms) * window_ms`; stores only need an atomic
//! "increment and return count" per `(key, window_start)`.

use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    /// Start of the window containing `now_ms`
    pub fn window_start(&self, now_ms: i64) -> i64 {
        let window_ms = self.window_ms().max(1);
        (now_ms / window_ms) * window_ms
    }

    /// Evaluate a counter value (after increment) for the given window
    pub fn evaluate(&self, count: i64, window_start_ms: i64) -> RateLimitResult {
        let max = i64::from(self.max_requests);
        RateLimitResult {
            allowed: count <= max,
            remaining: (max - count).max(0) as u32,
            reset_at_ms: window_start_ms + self.window_ms(),
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Seconds until the window resets, rounded up, at least 1
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let remaining_ms = (self.reset_at_ms - now_ms).max(0);
        ((remaining_ms + 999) / 1000).max(1) as u64
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Increment the counter for `key` in the current window and evaluate it
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}
