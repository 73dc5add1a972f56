//! Verification results

use crate::Claim;
use serde::{Deserialize, Serialize};

/// How a verdict was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// The verifier answered with a well-formed result tag
    Judged,
    /// No well-formed tag on the final attempt; the verdict came from the
    /// substring fallback
    Inferred,
    /// Every attempt failed; the claim is reported as false
    Exhausted,
}

/// A claim paired with its verdict
///
/// Created once per claim by the verifier and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The claim that was checked
    pub claim: Claim,
    /// Verdict; always `false` for [`Resolution::Exhausted`]
    pub verified: bool,
    /// How the verdict was reached
    pub resolution: Resolution,
}

impl VerificationResult {
    /// Verdict backed by a well-formed response
    pub fn judged(claim: Claim, verified: bool) -> Self {
        Self { claim, verified, resolution: Resolution::Judged }
    }

    /// Verdict taken from the substring fallback
    pub fn inferred(claim: Claim, verified: bool) -> Self {
        Self { claim, verified, resolution: Resolution::Inferred }
    }

    /// No verdict could be obtained
    pub fn exhausted(claim: Claim) -> Self {
        Self { claim, verified: false, resolution: Resolution::Exhausted }
    }

    /// True when the verifier never produced an answer
    pub fn is_unverified(&self) -> bool {
        self.resolution == Resolution::Exhausted
    }
}
