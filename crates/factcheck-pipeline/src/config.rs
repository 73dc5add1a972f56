//! Configuration for the pipeline
//!
//! Tunables only; credentials and endpoints belong to the binary.

use crate::retry::RetryPolicy;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Retry ceiling and delays for one stage
///
/// Inside a [`PipelineConfig`] a partial table is completed from the
/// defaults of its own stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay after an ordinary failure (milliseconds)
    pub backoff_ms: u64,

    /// Delay after the service reports a rate limit (seconds)
    pub rate_limit_backoff_secs: u64,
}

impl RetryConfig {
    /// Build the runtime policy
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff: Duration::from_millis(self.backoff_ms),
            rate_limit_backoff: Duration::from_secs(self.rate_limit_backoff_secs),
        }
    }

    /// Generation stage defaults: every failure, rate limits included,
    /// waits one second
    pub fn generation() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 1_000,
            rate_limit_backoff_secs: 1,
        }
    }

    /// Verification stage defaults: one second, or a minute after a rate limit
    pub fn verification() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 1_000,
            rate_limit_backoff_secs: 60,
        }
    }

    fn validate(&self, stage: &str) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err(format!("{}.max_attempts must be greater than 0", stage));
        }
        Ok(())
    }
}

/// A `[generation]` or `[verification]` table with any field left out
#[derive(Debug, Deserialize)]
struct PartialRetryConfig {
    max_attempts: Option<u32>,
    backoff_ms: Option<u64>,
    rate_limit_backoff_secs: Option<u64>,
}

impl PartialRetryConfig {
    fn complete(self, base: RetryConfig) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts.unwrap_or(base.max_attempts),
            backoff_ms: self.backoff_ms.unwrap_or(base.backoff_ms),
            rate_limit_backoff_secs: self
                .rate_limit_backoff_secs
                .unwrap_or(base.rate_limit_backoff_secs),
        }
    }
}

fn generation_retry<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RetryConfig, D::Error> {
    Ok(PartialRetryConfig::deserialize(deserializer)?.complete(RetryConfig::generation()))
}

fn verification_retry<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RetryConfig, D::Error> {
    Ok(PartialRetryConfig::deserialize(deserializer)?.complete(RetryConfig::verification()))
}

/// Configuration for the generate-then-verify pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Claims verified concurrently per batch
    pub batch_size: usize,

    /// Pause between batches (seconds)
    pub batch_cooldown_secs: u64,

    /// Retry settings for claim generation
    #[serde(deserialize_with = "generation_retry")]
    pub generation: RetryConfig,

    /// Retry settings for each claim verification
    #[serde(deserialize_with = "verification_retry")]
    pub verification: RetryConfig,
}

impl PipelineConfig {
    /// Get the inter-batch cool-down as a Duration
    pub fn batch_cooldown(&self) -> Duration {
        Duration::from_secs(self.batch_cooldown_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        self.generation.validate("generation")?;
        self.verification.validate("verification")?;
        Ok(())
    }

    /// Aggressive preset: fewer retries, shorter pauses
    pub fn aggressive() -> Self {
        Self {
            batch_size: 50,
            batch_cooldown_secs: 30,
            generation: RetryConfig { max_attempts: 2, ..RetryConfig::generation() },
            verification: RetryConfig {
                max_attempts: 2,
                backoff_ms: 500,
                rate_limit_backoff_secs: 30,
            },
        }
    }

    /// Lenient preset: smaller batches, more retries, longer pauses
    pub fn lenient() -> Self {
        Self {
            batch_size: 25,
            batch_cooldown_secs: 90,
            generation: RetryConfig { max_attempts: 5, ..RetryConfig::generation() },
            verification: RetryConfig {
                max_attempts: 5,
                backoff_ms: 2_000,
                rate_limit_backoff_secs: 90,
            },
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            batch_cooldown_secs: 60,
            generation: RetryConfig::generation(),
            verification: RetryConfig::verification(),
        }
    }
}
