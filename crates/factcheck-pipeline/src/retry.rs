//! Retry loop shared by generation and verification
//!
//! Every provider call resolves to `Ok(value)` or an [`AttemptError`] naming
//! the failure kind. The loop picks the delay from the kind and stops at the
//! attempt ceiling. Nothing past this boundary sees a provider error.

use factcheck_domain::ProviderError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Why a single attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// The reply arrived but did not hold the expected tags
    #[error("malformed reply: {0}")]
    Malformed(String),

    /// The service asked us to slow down
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other provider failure
    #[error("request failed: {0}")]
    Transport(String),
}

impl AttemptError {
    /// Classify a provider error
    pub fn from_provider<E: ProviderError>(error: &E) -> Self {
        if error.is_rate_limited() {
            AttemptError::RateLimited(error.to_string())
        } else {
            AttemptError::Transport(error.to_string())
        }
    }
}

/// Position of an attempt within the retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based attempt number
    pub number: u32,
    /// Attempt ceiling
    pub max: u32,
}

impl Attempt {
    /// No retry follows this attempt
    pub fn is_final(&self) -> bool {
        self.number >= self.max
    }
}

/// Attempt ceiling plus per-kind delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay after malformed replies and transport failures
    pub backoff: Duration,
    /// Delay after a rate limit
    pub rate_limit_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before the attempt following `error`
    pub fn delay_for(&self, error: &AttemptError) -> Duration {
        match error {
            AttemptError::RateLimited(_) => self.rate_limit_backoff,
            AttemptError::Malformed(_) | AttemptError::Transport(_) => self.backoff,
        }
    }
}

/// All attempts failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("gave up after {attempts} attempt(s): {last_error}")]
pub struct RetryExhausted {
    /// Attempts made
    pub attempts: u32,
    /// Failure of the final attempt
    pub last_error: AttemptError,
}

/// Run `op` until it succeeds or the policy's ceiling is reached
///
/// There is no delay after the final attempt. A ceiling of zero is treated
/// as one attempt.
pub async fn retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut(Attempt) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let max = policy.max_attempts.max(1);
    let mut number = 1;

    loop {
        let attempt = Attempt { number, max };
        let error = match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if attempt.is_final() {
            return Err(RetryExhausted { attempts: number, last_error: error });
        }

        let delay = policy.delay_for(&error);
        warn!(
            "{} failed (attempt {}/{}): {}; retrying in {:?}",
            label, number, max, error, delay
        );
        tokio::time::sleep(delay).await;
        number += 1;
    }
}
