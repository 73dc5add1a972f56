//! Error types for the pipeline

use thiserror::Error;

/// Errors that end a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Claim generation never produced a usable list
    #[error("Fact generation failed after {attempts} attempt(s): {reason}")]
    GenerationExhausted {
        /// Attempts made
        attempts: u32,
        /// Last failure seen
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors while writing a run record
#[derive(Error, Debug)]
pub enum ReportError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rendered JSON was not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
