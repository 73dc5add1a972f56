//! Claim module - the unit of generation and verification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters shown when a claim is quoted in log output
pub const PREVIEW_CHARS: usize = 50;

/// A single factual statement about a topic
///
/// Claims carry no identity beyond their text. Two claims with the same
/// text are still verified independently.
///
/// # Examples
///
/// ```
/// use factcheck_domain::Claim;
///
/// let claim = Claim::new("Octopuses have three hearts.");
/// assert_eq!(claim.as_str(), "Octopuses have three hearts.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    /// Create a claim from its text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the claim text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for log lines
    ///
    /// Truncates on character boundaries, so multi-byte text is never split.
    ///
    /// ```
    /// use factcheck_domain::Claim;
    ///
    /// let claim = Claim::new("x".repeat(80));
    /// assert_eq!(claim.preview(), format!("{}...", "x".repeat(50)));
    /// assert_eq!(Claim::new("short").preview(), "short");
    /// ```
    pub fn preview(&self) -> String {
        if self.0.chars().count() <= PREVIEW_CHARS {
            return self.0.clone();
        }
        let head: String = self.0.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Claim {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Claim {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
