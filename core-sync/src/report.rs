//! Sync invocation summary
//!
//! Built fresh per invocation, returned to the caller, then discarded.

use serde::Serialize;

/// A filename whose title could not be parsed. Never fatal; recorded so the
/// run can be audited, but not surfaced as a warning identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedTitle {
    /// The filename as listed remotely
    pub filename: String,
    /// Why it could not be parsed
    pub reason: String,
}

/// Aggregated result of one sync invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    /// Number of panorama files attached to a building, counted per file
    /// processed for a successfully saved identifier
    pub saved: usize,

    /// Install numbers that could not be resolved or persisted, in the order
    /// they were encountered
    pub warnings: Vec<String>,

    /// Filenames skipped because their titles did not parse
    pub rejected: Vec<RejectedTitle>,
}

impl SyncReport {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
