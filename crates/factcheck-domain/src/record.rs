//! Run records - the persisted outcome of one pipeline run
//!
//! Field order in these structs is the key order of the written file.

use crate::VerificationResult;
use serde::{Deserialize, Serialize};

/// One entry of the `true_facts` / `false_facts` arrays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactEntry {
    /// Claim text
    pub fact: String,
    /// Verdict (matches the array the entry sits in)
    pub verified: bool,
}

/// Summary counts for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of verified claims
    pub total_facts: usize,
    /// Claims judged true
    pub true_facts_count: usize,
    /// Claims judged false or left unverified
    pub false_facts_count: usize,
    /// `true / total` as a percentage with one decimal, `"0%"` for an empty run
    pub accuracy_rate: String,
}

impl Statistics {
    /// Compute statistics from raw counts
    ///
    /// # Examples
    ///
    /// ```
    /// use factcheck_domain::Statistics;
    ///
    /// assert_eq!(Statistics::from_counts(2, 3).accuracy_rate, "66.7%");
    /// assert_eq!(Statistics::from_counts(0, 0).accuracy_rate, "0%");
    /// ```
    pub fn from_counts(true_count: usize, total: usize) -> Self {
        Self {
            total_facts: total,
            true_facts_count: true_count,
            false_facts_count: total.saturating_sub(true_count),
            accuracy_rate: accuracy_rate(true_count, total),
        }
    }
}

/// Format `true_count / total` as `"NN.N%"`
pub fn accuracy_rate(true_count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", true_count as f64 / total as f64 * 100.0)
}

/// Persisted summary of one generate-then-verify run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Topic the claims were generated for
    pub topic: String,
    /// ISO-8601 timestamp taken when the record was built
    pub timestamp: String,
    /// Claims judged true, in input order
    pub true_facts: Vec<FactEntry>,
    /// Claims judged false or left unverified, in input order
    pub false_facts: Vec<FactEntry>,
    /// Derived counts
    pub statistics: Statistics,
}

impl RunRecord {
    /// Group results by verdict and compute statistics
    ///
    /// Every result lands in exactly one of the two arrays, and relative
    /// order within each array follows `results`.
    pub fn build(
        topic: impl Into<String>,
        results: &[VerificationResult],
        timestamp: impl Into<String>,
    ) -> Self {
        let (true_facts, false_facts): (Vec<_>, Vec<_>) = results
            .iter()
            .map(|r| FactEntry {
                fact: r.claim.as_str().to_string(),
                verified: r.verified,
            })
            .partition(|entry| entry.verified);

        let statistics = Statistics::from_counts(true_facts.len(), results.len());

        Self {
            topic: topic.into(),
            timestamp: timestamp.into(),
            true_facts,
            false_facts,
            statistics,
        }
    }
}
