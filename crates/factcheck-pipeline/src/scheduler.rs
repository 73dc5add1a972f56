//! Batched, rate-limited verification

use crate::config::PipelineConfig;
use crate::verifier::ClaimVerifier;
use factcheck_domain::{ChatProvider, Claim, VerificationResult};
use futures::future::join_all;
use std::time::Duration;
use tracing::{info, warn};

/// Verifies claims in fixed-size concurrent batches
///
/// All claims of a batch are in flight together, so `batch_size` is both
/// the concurrency cap and the rate-limit window. Batches are separated by
/// a cool-down; none follows the last batch.
pub struct BatchScheduler<P: ChatProvider> {
    verifier: ClaimVerifier<P>,
    batch_size: usize,
    cooldown: Duration,
}

impl<P: ChatProvider> BatchScheduler<P> {
    /// Create a scheduler using the batch settings of `config`
    pub fn new(verifier: ClaimVerifier<P>, config: &PipelineConfig) -> Self {
        Self {
            verifier,
            batch_size: config.batch_size.max(1),
            cooldown: config.batch_cooldown(),
        }
    }

    /// Number of batches `claim_count` claims split into
    pub fn batch_count(&self, claim_count: usize) -> usize {
        claim_count.div_ceil(self.batch_size)
    }

    /// Verify every claim, preserving order
    ///
    /// `result[i]` always belongs to `claims[i]`. A failing verification
    /// resolves to a false result and never disturbs the rest of its batch.
    pub async fn verify_all(&self, claims: Vec<Claim>) -> Vec<VerificationResult> {
        let total_batches = self.batch_count(claims.len());
        if total_batches > 1 {
            warn!(
                "Large number of facts ({}) will be processed in batches of {}",
                claims.len(),
                self.batch_size
            );
        }

        let mut results = Vec::with_capacity(claims.len());
        for (index, batch) in claims.chunks(self.batch_size).enumerate() {
            info!(
                "Processing batch {}/{} ({} facts)...",
                index + 1,
                total_batches,
                batch.len()
            );

            let verifications = batch.iter().cloned().map(|claim| self.verifier.verify(claim));
            results.extend(join_all(verifications).await);

            if index + 1 < total_batches {
                info!(
                    "Rate limit cool-down: waiting {:?} before next batch...",
                    self.cooldown
                );
                tokio::time::sleep(self.cooldown).await;
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use factcheck_llm::MockProvider;
    use std::sync::Arc;
    use tokio::time::Instant;

    fn scheduler(provider: &MockProvider, batch_size: usize) -> BatchScheduler<MockProvider> {
        let config = PipelineConfig { batch_size, ..PipelineConfig::default() };
        let verifier = ClaimVerifier::new(Arc::new(provider.clone()), &RetryConfig::verification());
        BatchScheduler::new(verifier, &config)
    }

    fn claims(n: usize) -> Vec<Claim> {
        (0..n).map(|i| Claim::new(format!("claim {}", i))).collect()
    }

    #[test]
    fn test_batch_count() {
        let provider = MockProvider::default();
        let s = scheduler(&provider, 50);
        assert_eq!(s.batch_count(0), 0);
        assert_eq!(s.batch_count(50), 1);
        assert_eq!(s.batch_count(51), 2);
        assert_eq!(s.batch_count(60), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input() {
        let provider = MockProvider::new("<result>true</result>");
        let start = Instant::now();
        let results = scheduler(&provider, 50).verify_all(Vec::new()).await;
        assert!(results.is_empty());
        assert_eq!(provider.call_count(), 0);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_batch_has_no_cooldown() {
        let provider = MockProvider::new("<result>true</result>");
        let start = Instant::now();
        let results = scheduler(&provider, 50).verify_all(claims(50)).await;
        assert_eq!(results.len(), 50);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sixty_claims_two_batches() {
        let provider = MockProvider::new("<result>true</result>");
        let input = claims(60);

        let start = Instant::now();
        let results = scheduler(&provider, 50).verify_all(input.clone()).await;

        assert_eq!(results.len(), 60);
        assert_eq!(provider.call_count(), 60);
        // One cool-down between the 50 and the 10, none after
        assert_eq!(start.elapsed(), Duration::from_secs(60));
        for (result, claim) in results.iter().zip(&input) {
            assert_eq!(&result.claim, claim);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_runs_concurrently() {
        // Every claim needs one retry (1s). Run sequentially this would take
        // 10s; concurrently the batch finishes after a single backoff.
        let provider = MockProvider::new("<result>true</result>");
        let input = claims(10);
        for claim in &input {
            provider.add_response(crate::prompt::verification_request(claim), "garbled");
        }

        let start = Instant::now();
        let results = scheduler(&provider, 10).verify_all(input).await;

        assert!(results.iter().all(|r| r.verified));
        assert_eq!(provider.call_count(), 20);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }
}
