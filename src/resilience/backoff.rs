//! Exponential backoff with full jitter.

use rand::Rng;
use std::time::Duration;

const DEFAULT_BASE: Duration = Duration::from_secs(1);
const DEFAULT_CEILING: Duration = Duration::from_secs(60);

/// Compute the wait before retry number `attempt`.
///
/// The raw delay is `min(base * 2^attempt, ceiling)`; full jitter then draws
/// the final delay uniformly from `[0, raw]` to avoid thundering-herd
/// synchronization across concurrent callers. A zero `base` falls back to
/// 1 second and a zero `ceiling` to 60 seconds, so the output is always
/// bounded.
pub fn backoff_delay(attempt: u32, base: Duration, ceiling: Duration) -> Duration {
    let base = if base.is_zero() { DEFAULT_BASE } else { base };
    let ceiling = if ceiling.is_zero() {
        DEFAULT_CEILING
    } else {
        ceiling
    };

    // f64 overflow on large attempts saturates to infinity; min() caps it.
    let raw = base.as_secs_f64() * 2_f64.powi(attempt.min(1024) as i32);
    let capped = raw.min(ceiling.as_secs_f64());

    let jittered = rand::thread_rng().gen_range(0.0..=capped);
    Duration::from_secs_f64(jittered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_within_bounds() {
        let base = Duration::from_millis(100);
        let ceiling = Duration::from_secs(10);
        for attempt in 0..20 {
            let delay = backoff_delay(attempt, base, ceiling);
            let cap = (base.as_secs_f64() * 2_f64.powi(attempt as i32))
                .min(ceiling.as_secs_f64());
            assert!(
                delay.as_secs_f64() <= cap + f64::EPSILON,
                "attempt {attempt}: {delay:?} exceeds cap {cap}"
            );
        }
    }

    #[test]
    fn test_degenerate_inputs_stay_bounded() {
        for attempt in [0, 1, 10, 100] {
            let delay = backoff_delay(attempt, Duration::ZERO, Duration::ZERO);
            assert!(delay <= Duration::from_secs(60));
        }
    }

    #[test]
    fn test_huge_attempt_capped_at_ceiling() {
        let delay = backoff_delay(u32::MAX, Duration::from_secs(1), Duration::from_secs(30));
        assert!(delay <= Duration::from_secs(30));
    }

    #[test]
    fn test_jitter_produces_varying_delays() {
        let delays: Vec<Duration> = (0..50)
            .map(|_| backoff_delay(3, Duration::from_secs(1), Duration::from_secs(60)))
            .collect();
        let mut distinct = delays.clone();
        distinct.sort();
        distinct.dedup();
        assert!(
            distinct.len() >= 2,
            "expected jitter to vary across calls, got {delays:?}"
        );
    }
}
