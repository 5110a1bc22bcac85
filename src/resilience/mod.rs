//! Resilience primitives: local rate limiting and retry backoff.

mod backoff;
mod rate_limiter;

pub use backoff::backoff_delay;
pub use rate_limiter::RateLimiter;
