//! End-to-end pipeline scenarios

#[cfg(test)]
mod tests {
    use crate::prompt::{generation_request, verification_request};
    use crate::{build_record, FactCheckPipeline, PipelineConfig, PipelineError};
    use factcheck_domain::{Claim, Resolution};
    use factcheck_llm::{MockProvider, MockReply};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    fn pipeline(
        generation: &MockProvider,
        verification: &MockProvider,
    ) -> FactCheckPipeline<MockProvider, MockProvider> {
        FactCheckPipeline::new(
            Arc::new(generation.clone()),
            Arc::new(verification.clone()),
            &PipelineConfig::default(),
        )
        .unwrap()
    }

    fn fact_list(facts: &[String]) -> String {
        facts.iter().map(|f| format!("<fact>{}</fact>\n", f)).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_octopus_run_all_true() {
        let generation = MockProvider::new(
            "<fact>Octopuses have three hearts.</fact>
             <fact>Octopus blood is blue.</fact>
             <fact>Octopuses have eight arms.</fact>",
        );
        let verification = MockProvider::new("<result>true</result>");

        let results = pipeline(&generation, &verification)
            .run("Octopuses", 3)
            .await
            .unwrap();
        let record = build_record("Octopuses", &results);

        assert_eq!(generation.prompts(), vec![generation_request("Octopuses", 3)]);
        assert_eq!(verification.call_count(), 3);
        assert_eq!(record.topic, "Octopuses");
        assert_eq!(record.true_facts.len(), 3);
        assert_eq!(record.false_facts.len(), 0);
        assert_eq!(record.statistics.total_facts, 3);
        assert_eq!(record.statistics.accuracy_rate, "100.0%");
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_recovers_after_malformed_reply() {
        let generation = MockProvider::new("unused");
        generation.push_response("<fact>Octopuses have three hearts.</fct>");
        generation.push_response("<fact>Octopuses have three hearts.</fact>");
        let verification = MockProvider::new("<result>true</result>");

        let start = Instant::now();
        let claims = pipeline(&generation, &verification)
            .generator()
            .generate("Octopuses", 1)
            .await
            .unwrap();

        assert_eq!(claims, vec![Claim::new("Octopuses have three hearts.")]);
        assert_eq!(generation.call_count(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_verification_waits_out_rate_limit() {
        let generation = MockProvider::new("<fact>Octopuses have three hearts.</fact>");
        let verification = MockProvider::new("unused");
        let prompt = verification_request(&Claim::new("Octopuses have three hearts."));
        verification.add_reply(prompt.clone(), MockReply::RateLimited);
        verification.add_response(prompt.clone(), "<result>false</result>");

        let start = Instant::now();
        let results = pipeline(&generation, &verification)
            .run("Octopuses", 1)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results[0].verified);
        assert_eq!(results[0].resolution, Resolution::Judged);
        assert_eq!(verification.calls_for(&prompt), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sixty_claims_split_fifty_and_ten() {
        let facts: Vec<String> = (0..60).map(|i| format!("Fact number {}", i)).collect();
        let generation = MockProvider::new(fact_list(&facts));
        let verification = MockProvider::new("<result>true</result>");

        let start = Instant::now();
        let results = pipeline(&generation, &verification)
            .run("Numbers", 60)
            .await
            .unwrap();

        assert_eq!(results.len(), 60);
        assert_eq!(verification.call_count(), 60);
        assert_eq!(start.elapsed(), Duration::from_secs(60));

        // The first 50 calls arrive before the cool-down, the last 10 after
        let prompts = verification.prompts();
        assert_eq!(prompts[49], verification_request(&Claim::new("Fact number 49")));
        assert_eq!(prompts[50], verification_request(&Claim::new("Fact number 50")));

        for (result, fact) in results.iter().zip(&facts) {
            assert_eq!(result.claim.as_str(), fact);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_claim_does_not_affect_batch() {
        let generation = MockProvider::new("<fact>good one</fact><fact>bad one</fact><fact>good two</fact>");
        let verification = MockProvider::new("<result>true</result>");
        let bad = verification_request(&Claim::new("bad one"));
        for _ in 0..3 {
            verification.add_reply(bad.clone(), MockReply::Fail("HTTP 502: bad gateway".into()));
        }

        let results = pipeline(&generation, &verification)
            .run("mixed", 3)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].verified);
        assert!(!results[1].verified);
        assert_eq!(results[1].resolution, Resolution::Exhausted);
        assert!(results[2].verified);
        assert_eq!(verification.calls_for(&bad), 3);

        let record = build_record("mixed", &results);
        assert_eq!(record.statistics.true_facts_count, 2);
        assert_eq!(record.statistics.false_facts_count, 1);
        assert_eq!(record.statistics.accuracy_rate, "66.7%");
        assert_eq!(record.false_facts[0].fact, "bad one");
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_failure_skips_verification() {
        let generation = MockProvider::new("No facts today.");
        let verification = MockProvider::new("<result>true</result>");

        let result = pipeline(&generation, &verification).run("nothing", 3).await;

        assert!(matches!(
            result,
            Err(PipelineError::GenerationExhausted { attempts: 3, .. })
        ));
        assert_eq!(verification.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_claims_verified_independently() {
        let generation = MockProvider::new("<fact>same</fact><fact>same</fact>");
        let verification = MockProvider::new("<result>true</result>");
        let prompt = verification_request(&Claim::new("same"));
        verification.add_response(prompt.clone(), "<result>false</result>");

        let results = pipeline(&generation, &verification)
            .run("dupes", 2)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(verification.calls_for(&prompt), 2);
        assert_eq!(results.iter().filter(|r| r.verified).count(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let provider = MockProvider::default();
        let config = PipelineConfig { batch_size: 0, ..PipelineConfig::default() };
        let result = FactCheckPipeline::new(Arc::new(provider.clone()), Arc::new(provider), &config);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
