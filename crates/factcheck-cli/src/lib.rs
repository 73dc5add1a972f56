//! Factcheck CLI library.
//!
//! Configuration loading, interactive input, run execution and output
//! formatting for the `factcheck` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod run;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
