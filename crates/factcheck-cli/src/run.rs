//! Run execution: provider wiring, the pipeline run, console report and
//! persistence.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::input::RunRequest;
use crate::output::Formatter;
use factcheck_domain::{ChatProvider, RunRecord};
use factcheck_llm::OpenAiCompatibleProvider;
use factcheck_pipeline::{build_record, persist, FactCheckPipeline, PipelineError};
use std::sync::Arc;
use tracing::debug;

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Claims were generated, verified and reported
    Completed(RunRecord),
    /// Generation failed; nothing was verified or saved
    NoFacts,
}

/// Build the generation and verification providers from configuration.
pub fn build_providers(
    config: &Config,
) -> Result<(OpenAiCompatibleProvider, OpenAiCompatibleProvider)> {
    let generation = OpenAiCompatibleProvider::new(config.generation.provider_options())?;
    let verification = OpenAiCompatibleProvider::new(config.verification.provider_options())?;
    debug!(
        "Generation via {}, verification via {}",
        generation.endpoint(),
        verification.endpoint()
    );
    Ok((generation, verification))
}

/// Execute one run and print its report.
///
/// A persistence failure is printed and does not fail the run.
pub async fn execute<G, V>(
    request: &RunRequest,
    config: &Config,
    formatter: &Formatter,
    generation: Arc<G>,
    verification: Arc<V>,
) -> Result<RunOutcome>
where
    G: ChatProvider,
    V: ChatProvider,
{
    println!(
        "{}",
        formatter.info(&format!(
            "Connecting to {} to get {} facts about {}...",
            generation.model(),
            request.count,
            request.topic
        ))
    );

    let pipeline = FactCheckPipeline::new(generation, verification, &config.pipeline)?;
    let results = match pipeline.run(&request.topic, request.count).await {
        Ok(results) => results,
        Err(PipelineError::GenerationExhausted { .. }) => {
            println!(
                "{}",
                formatter.error("No facts were generated. Please try again.")
            );
            return Ok(RunOutcome::NoFacts);
        }
        Err(e) => return Err(e.into()),
    };

    println!();
    println!("{}", formatter.success("Here are your verified facts:"));
    println!("{}", formatter.results(&results));

    let unverified = results.iter().filter(|r| r.is_unverified()).count();
    if unverified > 0 {
        println!(
            "{}",
            formatter.warning(&format!(
                "{} fact(s) could not be verified and are counted as false",
                unverified
            ))
        );
    }

    let record = build_record(&request.topic, &results);
    match persist(&record, &config.settings.output) {
        Ok(()) => println!(
            "{}",
            formatter.success(&format!(
                "Results saved to {}",
                config.settings.output.display()
            ))
        ),
        Err(e) => println!("{}", formatter.error(&CliError::from(e).to_string())),
    }
    println!("{}", formatter.statistics(&record.statistics, unverified));

    Ok(RunOutcome::Completed(record))
}
