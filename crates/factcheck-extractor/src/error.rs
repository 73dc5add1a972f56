//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The reply is not well-formed markup once wrapped in the root element
    #[error("Malformed markup: {0}")]
    Malformed(String),
}
