//! Factcheck Domain Layer
//!
//! This crate contains the value objects and trait boundaries shared by every
//! other layer of the fact-checking pipeline. It carries no infrastructure:
//! HTTP clients, markup parsing and file output all live in other crates.
//!
//! ## Key Concepts
//!
//! - **Claim**: a single factual statement produced by the generation model
//! - **VerificationResult**: a claim paired with the verification model's verdict
//! - **Resolution**: how that verdict was reached (judged, inferred, exhausted)
//! - **RunRecord**: the persisted summary of one generate-then-verify run
//!
//! ## Architecture
//!
//! - Pure data and business rules only
//! - `ChatProvider` is the seam to the remote text-generation services
//! - Infrastructure implementations live in `factcheck-llm`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod record;
pub mod traits;
pub mod verification;

// Re-exports for convenience
pub use claim::Claim;
pub use record::{FactEntry, RunRecord, Statistics};
pub use traits::{ChatMessage, ChatProvider, ProviderError, Role};
pub use verification::{Resolution, VerificationResult};
