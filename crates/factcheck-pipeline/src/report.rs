//! Run records on disk

use crate::error::ReportError;
use factcheck_domain::{RunRecord, VerificationResult};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "verified_facts.json";

/// Local time now, ISO-8601 with microseconds and no offset
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Build a record stamped with the current time
pub fn build_record(topic: &str, results: &[VerificationResult]) -> RunRecord {
    RunRecord::build(topic, results, timestamp_now())
}

/// Render a record as 4-space indented JSON
///
/// Keys follow struct declaration order. Non-ASCII text is written as-is.
pub fn to_json(record: &RunRecord) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Write a record to `path`, replacing any existing file
pub fn persist(record: &RunRecord, path: &Path) -> Result<(), ReportError> {
    let json = to_json(record)?;
    std::fs::write(path, json)?;
    info!("Results saved to {}", path.display());
    Ok(())
}
