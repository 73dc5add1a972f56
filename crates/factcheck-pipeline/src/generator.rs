//! Claim generation

use crate::config::RetryConfig;
use crate::error::PipelineError;
use crate::prompt::{generation_messages, FACT_TAG};
use crate::retry::{retry, AttemptError, RetryPolicy};
use factcheck_domain::{ChatProvider, Claim};
use factcheck_extractor::extract_all;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Asks the generation model for a list of claims about a topic
pub struct ClaimGenerator<P: ChatProvider> {
    provider: Arc<P>,
    policy: RetryPolicy,
}

impl<P: ChatProvider> ClaimGenerator<P> {
    /// Create a new generator
    pub fn new(provider: Arc<P>, config: &RetryConfig) -> Self {
        Self {
            provider,
            policy: config.policy(),
        }
    }

    /// Request `count` claims about `topic`
    ///
    /// Each attempt is one request. Provider errors, markup that does not
    /// parse, and replies without any `<fact>` entries all consume an
    /// attempt. The model's list is returned as-is even when its length
    /// differs from `count`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::GenerationExhausted`] when no attempt produced claims.
    pub async fn generate(&self, topic: &str, count: usize) -> Result<Vec<Claim>, PipelineError> {
        let messages = generation_messages(topic, count);
        let messages = &messages;
        let provider = &self.provider;

        info!(
            "Requesting {} facts about '{}' from {}",
            count,
            topic,
            provider.model()
        );

        let outcome = retry(&self.policy, "Fact generation", |attempt| async move {
            info!("Generating facts (Attempt {}/{})...", attempt.number, attempt.max);

            let reply = provider
                .complete(messages)
                .await
                .map_err(|e| AttemptError::from_provider(&e))?;

            let facts = extract_all(&reply, FACT_TAG).map_err(|e| {
                AttemptError::Malformed(format!("{}; raw reply: {}", e, reply.trim()))
            })?;

            if facts.is_empty() {
                return Err(AttemptError::Malformed(format!(
                    "no <{}> entries; raw reply: {}",
                    FACT_TAG,
                    reply.trim()
                )));
            }

            Ok(facts)
        })
        .await;

        match outcome {
            Ok(facts) => {
                if facts.len() != count {
                    warn!("Asked for {} facts, model returned {}", count, facts.len());
                }
                info!("Facts generated successfully ({})", facts.len());
                Ok(facts.into_iter().map(Claim::new).collect())
            }
            Err(exhausted) => {
                error!("Max retries reached for fact generation: {}", exhausted.last_error);
                Err(PipelineError::GenerationExhausted {
                    attempts: exhausted.attempts,
                    reason: exhausted.last_error.to_string(),
                })
            }
        }
    }
}
