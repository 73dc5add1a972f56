//! Output formatting for the CLI.

use colored::*;
use factcheck_domain::{Statistics, VerificationResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format one verified claim, numbered from 1.
    pub fn result_line(&self, number: usize, result: &VerificationResult) -> String {
        let mut line = if result.verified {
            format!("{}. [✓] {}", number, result.claim)
        } else {
            format!("{}. [✗] {}", number, result.claim)
        };
        if result.is_unverified() {
            line.push_str(" (unverified)");
        }

        if result.verified {
            self.colorize(&line, "green")
        } else {
            self.colorize(&line, "red")
        }
    }

    /// Format all results, one line each, in order.
    pub fn results(&self, results: &[VerificationResult]) -> String {
        results
            .iter()
            .enumerate()
            .map(|(i, r)| self.result_line(i + 1, r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format run statistics as a table.
    pub fn statistics(&self, stats: &Statistics, unverified: usize) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Total", "True", "False", "Unverified", "Accuracy"]);
        builder.push_record([
            stats.total_facts.to_string(),
            stats.true_facts_count.to_string(),
            stats.false_facts_count.to_string(),
            unverified.to_string(),
            stats.accuracy_rate.clone(),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(message, "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(message, "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(message, "cyan")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(message, "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
