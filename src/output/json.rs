//! JSON output formatter for grouping results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//! Bytes that are not valid UTF-8 are replaced with U+FFFD.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "fingerprint": "abc123",
//!       "names": ["file1.txt", "file2.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "lines": 3,
//!     "records": 3,
//!     "malformed_lines": 0,
//!     "oversized_fingerprints": 0,
//!     "truncated_names": 0,
//!     "distinct_fingerprints": 2,
//!     "duplicate_groups": 1,
//!     "exit_code": 0,
//!     "exit_code_name": "FG000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::error::ExitCode;
use crate::grouping::{IngestSummary, ReportGroup};

/// A single group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// The shared fingerprint
    pub fingerprint: String,
    /// Distinct names recorded under it
    pub names: Vec<String>,
}

impl JsonGroup {
    /// Create a JSON group from a resolved report group.
    #[must_use]
    pub fn from_report_group(group: &ReportGroup<'_>) -> Self {
        Self {
            fingerprint: String::from_utf8_lossy(group.fingerprint).into_owned(),
            names: group
                .names
                .iter()
                .map(|name| String::from_utf8_lossy(name).into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Lines consumed from the input
    pub lines: u64,
    /// Records delivered to the store
    pub records: u64,
    /// Lines dropped as malformed
    pub malformed_lines: u64,
    /// Lines dropped for an oversized fingerprint
    pub oversized_fingerprints: u64,
    /// Records with a truncated name
    pub truncated_names: u64,
    /// Number of distinct fingerprints seen
    pub distinct_fingerprints: usize,
    /// Number of groups with 2+ distinct names
    pub duplicate_groups: usize,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "FG000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from ingest counters.
    #[must_use]
    pub fn new(
        summary: &IngestSummary,
        distinct_fingerprints: usize,
        duplicate_groups: usize,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            lines: summary.lines,
            records: summary.records,
            malformed_lines: summary.malformed_lines,
            oversized_fingerprints: summary.oversized_fingerprints,
            truncated_names: summary.truncated_names,
            distinct_fingerprints,
            duplicate_groups,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Groups with 2+ distinct names
    pub groups: Vec<JsonGroup>,
    /// Run statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the report from resolved groups and counters.
    #[must_use]
    pub fn new(
        groups: &[ReportGroup<'_>],
        summary: &IngestSummary,
        distinct_fingerprints: usize,
        exit_code: ExitCode,
    ) -> Self {
        let groups: Vec<JsonGroup> = groups
            .iter()
            .filter(|g| g.names.len() > 1)
            .map(JsonGroup::from_report_group)
            .collect();
        let duplicate_groups = groups.len();
        Self {
            groups,
            summary: JsonSummary::new(summary, distinct_fingerprints, duplicate_groups, exit_code),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer).map_err(serde_json::Error::io)?;
        writer.flush().map_err(serde_json::Error::io)
    }
}
