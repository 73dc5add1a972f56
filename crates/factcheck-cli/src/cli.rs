//! Command-line argument parsing.

use clap::Parser;
use factcheck_pipeline::PipelineConfig;
use std::path::PathBuf;

/// Generate facts about a topic with one model and verify them with another.
///
/// Topic and count are prompted for when not given on the command line.
#[derive(Debug, Parser)]
#[command(name = "factcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Topic to generate facts about
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Number of facts to generate
    #[arg(short = 'n', long)]
    pub count: Option<String>,

    /// Where to write the results (default: verified_facts.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "FACTCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Batching and retry preset, replacing the file's pipeline section
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Claims verified concurrently per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Model used to generate facts
    #[arg(long)]
    pub generation_model: Option<String>,

    /// Model used to verify facts
    #[arg(long)]
    pub verification_model: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Pipeline presets selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// 50 per batch, 3 attempts, 60s pauses
    Standard,
    /// Fewer retries, shorter pauses
    Aggressive,
    /// Smaller batches, more retries, longer pauses
    Lenient,
}

impl From<PresetArg> for PipelineConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Standard => PipelineConfig::default(),
            PresetArg::Aggressive => PipelineConfig::aggressive(),
            PresetArg::Lenient => PipelineConfig::lenient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_args() {
        let cli = Cli::parse_from([
            "factcheck",
            "--topic",
            "Octopuses",
            "-n",
            "3",
            "--output",
            "out.json",
            "--batch-size",
            "10",
            "--no-color",
        ]);
        assert_eq!(cli.topic.as_deref(), Some("Octopuses"));
        assert_eq!(cli.count.as_deref(), Some("3"));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.batch_size, Some(10));
        assert!(cli.no_color);
    }

    #[test]
    fn test_count_is_taken_raw() {
        // Validation happens later so bad counts get the same message as
        // interactive input
        let cli = Cli::parse_from(["factcheck", "--count", "many"]);
        assert_eq!(cli.count.as_deref(), Some("many"));
    }

    #[test]
    fn test_preset_flag() {
        let cli = Cli::parse_from(["factcheck", "--preset", "lenient"]);
        assert_eq!(cli.preset, Some(PresetArg::Lenient));
        assert_eq!(PipelineConfig::from(PresetArg::Lenient).batch_size, 25);
        assert!(Cli::try_parse_from(["factcheck", "--preset", "reckless"]).is_err());
    }

    #[test]
    fn test_no_args() {
        let cli = Cli::parse_from(["factcheck"]);
        assert!(cli.topic.is_none());
        assert!(cli.count.is_none());
        assert!(!cli.no_color);
    }
}
