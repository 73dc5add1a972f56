//! Factcheck Pipeline
//!
//! Generates claims about a topic with one model and verifies each of them
//! with another.
//!
//! # Architecture
//!
//! ```text
//! topic, count → ClaimGenerator → claims → BatchScheduler → ClaimVerifier (per claim)
//!              → results → RunRecord → verified_facts.json
//! ```
//!
//! # Key Features
//!
//! - **Typed attempt outcomes**: every provider call resolves to a value or an
//!   `AttemptError` (malformed, rate limited, transport) inside one retry loop
//! - **Per-kind backoff**: short delay for ordinary failures, long delay for
//!   rate limits
//! - **Bounded concurrency**: claims are verified in concurrent batches with a
//!   cool-down between batches
//! - **Partial-failure tolerance**: a claim whose verification keeps failing
//!   is reported as false and never aborts the run
//!
//! # Example Usage
//!
//! ```no_run
//! use factcheck_llm::MockProvider;
//! use factcheck_pipeline::{build_record, FactCheckPipeline, PipelineConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generation = Arc::new(MockProvider::new("<fact>Octopuses have three hearts.</fact>"));
//! let verification = Arc::new(MockProvider::new("<result>true</result>"));
//! let pipeline = FactCheckPipeline::new(generation, verification, &PipelineConfig::default())?;
//!
//! let results = pipeline.run("Octopuses", 1).await?;
//! let record = build_record("Octopuses", &results);
//! println!("Accuracy: {}", record.statistics.accuracy_rate);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod generator;
mod prompt;
mod report;
mod retry;
mod scheduler;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::{PipelineConfig, RetryConfig};
pub use error::{PipelineError, ReportError};
pub use generator::ClaimGenerator;
pub use prompt::{FACT_TAG, RESULT_TAG};
pub use report::{build_record, persist, timestamp_now, to_json, DEFAULT_OUTPUT_FILE};
pub use retry::{retry, Attempt, AttemptError, RetryExhausted, RetryPolicy};
pub use scheduler::BatchScheduler;
pub use verifier::ClaimVerifier;

use factcheck_domain::{ChatProvider, VerificationResult};
use std::sync::Arc;
use tracing::info;

/// Generation followed by batched verification
pub struct FactCheckPipeline<G: ChatProvider, V: ChatProvider> {
    generator: ClaimGenerator<G>,
    scheduler: BatchScheduler<V>,
    verification_model: String,
}

impl<G: ChatProvider, V: ChatProvider> FactCheckPipeline<G, V> {
    /// Wire both stages from one configuration
    ///
    /// # Errors
    ///
    /// [`PipelineError::Config`] if the configuration does not validate.
    pub fn new(
        generation: Arc<G>,
        verification: Arc<V>,
        config: &PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;

        let verification_model = verification.model().to_string();
        let generator = ClaimGenerator::new(generation, &config.generation);
        let verifier = ClaimVerifier::new(verification, &config.verification);
        let scheduler = BatchScheduler::new(verifier, config);

        Ok(Self {
            generator,
            scheduler,
            verification_model,
        })
    }

    /// Generate `count` claims about `topic` and verify each one
    ///
    /// Results line up with the generated claims, one each.
    ///
    /// # Errors
    ///
    /// [`PipelineError::GenerationExhausted`] when no claims could be
    /// generated; nothing is verified in that case.
    pub async fn run(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<Vec<VerificationResult>, PipelineError> {
        let claims = self.generator.generate(topic, count).await?;

        info!(
            "Verifying {} facts using {} in {} batch(es)...",
            claims.len(),
            self.verification_model,
            self.scheduler.batch_count(claims.len())
        );

        Ok(self.scheduler.verify_all(claims).await)
    }

    /// The generation stage
    pub fn generator(&self) -> &ClaimGenerator<G> {
        &self.generator
    }
}
