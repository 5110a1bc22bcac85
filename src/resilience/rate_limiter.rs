//! Local token-bucket rate limiting.

use crate::errors::{WhoopError, WhoopResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The WHOOP API allows 100 requests per minute per user.
const REQUESTS_PER_MINUTE: u32 = 100;

/// Token-bucket limiter shared by every in-flight call.
///
/// Capacity equals the burst allowance (100) and tokens refill continuously
/// at 100/60 per second, matching the external per-minute limit. The bucket
/// is the only mutable state shared across concurrent calls; it is guarded
/// by a mutex so each caller consumes a token exactly once.
pub struct RateLimiter {
    bucket: Mutex<TokenBucket>,
    enabled: AtomicBool,
}

impl RateLimiter {
    /// Create a limiter configured for the WHOOP 100-requests-per-minute cap.
    pub fn new() -> Self {
        Self::with_rate(REQUESTS_PER_MINUTE, f64::from(REQUESTS_PER_MINUTE) / 60.0)
    }

    /// Create a limiter with a custom burst capacity and refill rate
    /// (tokens per second).
    pub fn with_rate(capacity: u32, refill_per_sec: f64) -> Self {
        Self {
            bucket: Mutex::new(TokenBucket::new(capacity, refill_per_sec)),
            enabled: AtomicBool::new(true),
        }
    }

    /// Enable or disable local rate limiting. Primarily used for testing
    /// and benchmarking against mock servers.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether local rate limiting is currently enforced.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Wait until a token is available or `cancel` fires.
    ///
    /// When the limiter is disabled this returns immediately. The wait is an
    /// exact timer for the next token raced against cancellation, not a
    /// polling loop; cancellation mid-wait returns promptly with
    /// [`WhoopError::WaitInterrupted`].
    pub async fn acquire(&self, cancel: &CancellationToken) -> WhoopResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        loop {
            let wait = {
                let mut bucket = self.bucket.lock().unwrap();
                if bucket.try_consume(1) {
                    return Ok(());
                }
                bucket.time_until_available(1)
            };

            debug!(wait_ms = wait.as_millis() as u64, "rate limiter waiting for token");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = cancel.cancelled() => return Err(WhoopError::WaitInterrupted),
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

struct TokenBucket {
    capacity: u32,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: u32, refill_per_sec: f64) -> Self {
        Self {
            capacity,
            tokens: f64::from(capacity),
            refill_per_sec,
            last_refill: Instant::now(),
        }
    }

    fn try_consume(&mut self, count: u32) -> bool {
        self.refill();
        if self.tokens >= f64::from(count) {
            self.tokens -= f64::from(count);
            true
        } else {
            false
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(f64::from(self.capacity));
        self.last_refill = now;
    }

    fn time_until_available(&self, count: u32) -> Duration {
        if self.tokens >= f64::from(count) {
            Duration::ZERO
        } else {
            let needed = f64::from(count) - self.tokens;
            Duration::from_secs_f64(needed / self.refill_per_sec)
        }
    }
}
