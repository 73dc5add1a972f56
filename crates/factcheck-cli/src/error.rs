//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input
    #[error("{0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Provider setup error
    #[error("Provider error: {0}")]
    Llm(#[from] factcheck_llm::LlmError),

    /// Pipeline error
    #[error(transparent)]
    Pipeline(#[from] factcheck_pipeline::PipelineError),

    /// Result persistence error
    #[error("Error saving results: {0}")]
    Report(#[from] factcheck_pipeline::ReportError),

    /// Line editor error
    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
