//! Topic and count input, from flags or an interactive prompt.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const COUNT_ERROR: &str = "Please enter a valid number for the number of facts.";

/// What one run should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Topic to generate facts about
    pub topic: String,
    /// Number of facts requested
    pub count: usize,
}

/// Validate a fact count: a positive integer, surrounding whitespace allowed.
pub fn parse_count(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(CliError::InvalidInput(COUNT_ERROR.to_string())),
    }
}

/// Validate a topic: any non-blank text, trimmed.
pub fn parse_topic(raw: &str) -> Result<String> {
    let topic = raw.trim();
    if topic.is_empty() {
        return Err(CliError::InvalidInput("Please enter a topic.".to_string()));
    }
    Ok(topic.to_string())
}

/// Resolve the run request, prompting for whatever the flags left out.
///
/// Fully flag-driven runs never touch the terminal.
pub fn read_request(cli: &Cli) -> Result<RunRequest> {
    if let (Some(topic), Some(count)) = (&cli.topic, &cli.count) {
        return Ok(RunRequest {
            topic: parse_topic(topic)?,
            count: parse_count(count)?,
        });
    }

    let mut editor = DefaultEditor::new()?;
    let topic = match &cli.topic {
        Some(topic) => parse_topic(topic)?,
        None => parse_topic(&prompt(&mut editor, "Enter a topic to get facts about: ")?)?,
    };
    let count = match &cli.count {
        Some(count) => parse_count(count)?,
        None => parse_count(&prompt(&mut editor, "How many facts would you like? ")?)?,
    };

    Ok(RunRequest { topic, count })
}

fn prompt(editor: &mut DefaultEditor, message: &str) -> Result<String> {
    match editor.readline(message) {
        Ok(line) => Ok(line),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
            Err(CliError::InvalidInput("Input cancelled.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
