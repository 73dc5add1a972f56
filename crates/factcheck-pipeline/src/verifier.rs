//! Per-claim verification

use crate::config::RetryConfig;
use crate::prompt::{verification_messages, RESULT_TAG};
use crate::retry::{retry, AttemptError, RetryPolicy};
use factcheck_domain::{ChatProvider, Claim, VerificationResult};
use factcheck_extractor::{extract_flag, FlagExtraction};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Asks the verification model whether a claim is true
pub struct ClaimVerifier<P: ChatProvider> {
    provider: Arc<P>,
    policy: RetryPolicy,
}

impl<P: ChatProvider> ClaimVerifier<P> {
    /// Create a new verifier
    pub fn new(provider: Arc<P>, config: &RetryConfig) -> Self {
        Self {
            provider,
            policy: config.policy(),
        }
    }

    /// Judge one claim
    ///
    /// A reply with a well-formed `<result>` tag is accepted at once. A reply
    /// without one is retried; on the last attempt the substring fallback is
    /// accepted instead. Rate limits wait the long backoff, everything else
    /// the short one. This never fails: when every attempt errors, the claim
    /// comes back `verified = false` with [`Resolution::Exhausted`].
    ///
    /// [`Resolution::Exhausted`]: factcheck_domain::Resolution::Exhausted
    pub async fn verify(&self, claim: Claim) -> VerificationResult {
        let messages = verification_messages(&claim);
        let messages = &messages;
        let provider = &self.provider;
        let preview = claim.preview();
        let preview = preview.as_str();
        let claim_ref = &claim;

        let label = format!("Verification of '{}'", preview);
        let outcome = retry(&self.policy, &label, |attempt| async move {
            info!(
                "Verifying fact: {} (Attempt {}/{})",
                preview, attempt.number, attempt.max
            );

            let reply = provider
                .complete(messages)
                .await
                .map_err(|e| AttemptError::from_provider(&e))?;

            match extract_flag(&reply, RESULT_TAG) {
                FlagExtraction::Strict(verified) => {
                    Ok(VerificationResult::judged(claim_ref.clone(), verified))
                }
                FlagExtraction::Heuristic(verified) if attempt.is_final() => {
                    debug!("Accepting substring verdict {} for: {}", verified, preview);
                    Ok(VerificationResult::inferred(claim_ref.clone(), verified))
                }
                FlagExtraction::Heuristic(_) => Err(AttemptError::Malformed(format!(
                    "no <{}> tag; raw reply: {}",
                    RESULT_TAG,
                    reply.trim()
                ))),
            }
        })
        .await;

        match outcome {
            Ok(result) => {
                info!("Verification complete for: {}", preview);
                result
            }
            Err(exhausted) => {
                error!(
                    "Max retries reached for '{}', marking fact as unverified: {}",
                    preview, exhausted.last_error
                );
                VerificationResult::exhausted(claim)
            }
        }
    }
}
