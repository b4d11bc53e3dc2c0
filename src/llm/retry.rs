//! Retry policy for failed completion requests.
//!
//! Delays grow linearly with the attempt number; the local heuristic
//! fallback takes over once the budget is exhausted.

use std::time::Duration;

/// Retry policy with linearly increasing backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts before giving up.
    pub max_attempts: u32,
    /// Base delay; attempt `n` waits `base_delay * n` before retrying.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay to wait after the given zero-based failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * (attempt + 1)
    }

    /// Whether another attempt is allowed after `attempt` failures.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_linearly() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));

        assert_eq!(policy.delay_after(0), Duration::from_millis(100));
        assert_eq!(policy.delay_after(1), Duration::from_millis(200));
        assert_eq!(policy.delay_after(2), Duration::from_millis(300));
    }

    #[test]
    fn retries_stop_at_max_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));

        assert!(policy.should_retry(0));
        assert!(policy.should_retry(1));
        assert!(!policy.should_retry(2));
        assert!(!policy.should_retry(10));
    }

    #[test]
    fn default_matches_api_config() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn single_attempt_policy_never_retries() {
        let policy = RetryPolicy::new(1, Duration::from_secs(1));
        assert!(!policy.should_retry(0));
    }
}
