//! Retry policy for transient request failures.
//!
//! Retries are off unless configured. Only failures where the request may
//! not have reached the backend, or the backend failed on its side, are
//! retried: timeouts, connection errors, and 5xx answers. A 4xx is final,
//! and a 401 is never retried because it has already cleared the session.

use std::time::Duration;

use crate::error::ApiError;

/// Delay strategy between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately.
    None,
    /// Same delay before every retry.
    Fixed(Duration),
    /// Doubling delay, capped at `max`.
    Exponential {
        /// Delay before the first retry.
        base: Duration,
        /// Upper bound for any delay.
        max: Duration,
    },
}

impl Backoff {
    /// Delay before retry number `attempt` (0-indexed).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(delay) => *delay,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                base.saturating_mul(multiplier).min(*max)
            }
        }
    }
}

/// How many times, and how patiently, to retry a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay strategy.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Retry up to `max_retries` times with the default exponential backoff.
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(200),
                max: Duration::from_secs(2),
            },
        }
    }

    /// Never retry.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Backoff::None,
        }
    }

    /// Set the backoff strategy.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Whether a request that failed with `error` on retry number
    /// `attempt` (0 for the first failure) should be sent again.
    #[must_use]
    pub fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(350),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(350));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(350));
    }

    #[test]
    fn test_should_retry_only_transient_errors() {
        let policy = RetryPolicy::new(2);
        let server = ApiError::Api {
            status: 502,
            message: None,
        };
        let missing = ApiError::Api {
            status: 404,
            message: None,
        };

        assert!(policy.should_retry(&server, 0));
        assert!(policy.should_retry(&server, 1));
        assert!(!policy.should_retry(&server, 2));
        assert!(!policy.should_retry(&missing, 0));
        assert!(!policy.should_retry(&ApiError::Unauthorized { message: None }, 0));
    }

    #[test]
    fn test_default_never_retries() {
        let server = ApiError::Api {
            status: 500,
            message: None,
        };
        assert!(!RetryPolicy::default().should_retry(&server, 0));
    }
}
