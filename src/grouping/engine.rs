//! Driver loop tying the scanner, interner and store together.
//!
//! # Overview
//!
//! [`Grouper`] owns everything one run needs: the [`Interner`], the
//! [`GroupStore`] and the [`FieldLimits`]. [`Grouper::ingest`] pulls lines
//! from a reader until it is exhausted:
//! 1. Scan one line into (fingerprint, name) or a classified failure
//! 2. Report the diagnostic, if any, as a warning
//! 3. Intern both fields and upsert them into the store
//!
//! Line-level problems never leave this loop. Only I/O errors on the reader
//! end the run.
//!
//! # Example
//!
//! ```
//! use fgroups::grouping::Grouper;
//! use fgroups::scanner::FieldLimits;
//!
//! let input: &[u8] = b"abc123 file1.txt\nabc123 file2.txt\nxyz999 file3.txt\n";
//!
//! let mut grouper = Grouper::new(FieldLimits::default());
//! let summary = grouper.ingest(input).unwrap();
//! assert_eq!(summary.records, 3);
//!
//! let report = grouper.report();
//! assert_eq!(report.len(), 1);
//! assert_eq!(report[0].names.len(), 2);
//! ```

use std::io::{self, BufRead};

use serde::Serialize;
use thiserror::Error;

use super::interner::Interner;
use super::store::{GroupStore, DEFAULT_STORE_CAPACITY};
use crate::scanner::{FieldLimits, FieldScanner, LineError, LineOutcome};

/// Errors that end an ingest.
#[derive(Debug, Error)]
pub enum GroupError {
    /// Reading the input failed.
    #[error("I/O error while reading records at line {line}: {source}")]
    Io {
        /// Line being read when the error occurred (1-based)
        line: u64,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Counters for one or more ingests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Lines consumed from the input
    pub lines: u64,
    /// Records delivered to the store (truncated ones included)
    pub records: u64,
    /// Lines dropped because the fingerprint was not followed by a separator
    pub malformed_lines: u64,
    /// Lines dropped because the fingerprint was too long
    pub oversized_fingerprints: u64,
    /// Records whose name was cut to the limit
    pub truncated_names: u64,
}

impl IngestSummary {
    /// Lines that contributed nothing to any group.
    #[must_use]
    pub fn discarded_lines(&self) -> u64 {
        self.malformed_lines + self.oversized_fingerprints
    }

    /// Whether any line produced a diagnostic.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.discarded_lines() + self.truncated_names > 0
    }

    fn record_issue(&mut self, issue: LineError) {
        match issue {
            LineError::Malformed => self.malformed_lines += 1,
            LineError::OversizedFingerprint => self.oversized_fingerprints += 1,
            LineError::NameTruncated => self.truncated_names += 1,
        }
    }

    fn merge(&mut self, other: &IngestSummary) {
        self.lines += other.lines;
        self.records += other.records;
        self.malformed_lines += other.malformed_lines;
        self.oversized_fingerprints += other.oversized_fingerprints;
        self.truncated_names += other.truncated_names;
    }
}

/// A multi-member group with its strings resolved, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup<'a> {
    /// The shared fingerprint
    pub fingerprint: &'a [u8],
    /// Distinct names in first-seen order
    pub names: Vec<&'a [u8]>,
}

/// Owner of all grouping state for one run.
#[derive(Debug)]
pub struct Grouper {
    limits: FieldLimits,
    interner: Interner,
    store: GroupStore,
    totals: IngestSummary,
}

impl Grouper {
    /// Create an empty grouper enforcing `limits`.
    #[must_use]
    pub fn new(limits: FieldLimits) -> Self {
        Self {
            limits,
            // Each record brings a fingerprint and a name.
            interner: Interner::with_capacity(2 * DEFAULT_STORE_CAPACITY),
            store: GroupStore::new(),
            totals: IngestSummary::default(),
        }
    }

    /// Limits applied to every ingested line.
    #[must_use]
    pub fn limits(&self) -> FieldLimits {
        self.limits
    }

    /// Read records from `reader` until it is exhausted.
    ///
    /// Each malformed, oversized or truncated line is logged at warn level
    /// with its diagnostic message and counted in the returned summary.
    /// Repeated calls keep adding to the same store.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Io`] if the reader fails. Records read before
    /// the failure stay in the store.
    pub fn ingest<R: BufRead>(&mut self, reader: R) -> Result<IngestSummary, GroupError> {
        let mut scanner = FieldScanner::new(reader, self.limits);
        let mut summary = IngestSummary::default();

        loop {
            let line = scanner.lines_scanned() + 1;
            let outcome = match scanner.scan_line() {
                Ok(Some(outcome)) => outcome,
                Ok(None) => break,
                Err(source) => return Err(GroupError::Io { line, source }),
            };
            summary.lines += 1;

            if let Some(issue) = outcome.diagnostic() {
                log::warn!("{}", issue);
                if issue.discards_line() {
                    log::debug!("Line {} dropped: {:?}", line, issue);
                } else {
                    log::debug!("Line {} kept with a truncated name", line);
                }
                summary.record_issue(issue);
            }

            if let LineOutcome::Success(record) | LineOutcome::NameTruncated(record) = outcome {
                let fingerprint = self.interner.intern(record.fingerprint);
                let name = self.interner.intern(record.name);
                self.store.upsert(fingerprint, name);
                summary.records += 1;
            }
        }

        log::debug!(
            "Ingested {} lines: {} records, {} discarded, {} truncated",
            summary.lines,
            summary.records,
            summary.discarded_lines(),
            summary.truncated_names
        );
        self.totals.merge(&summary);
        Ok(summary)
    }

    /// Record one pair directly, bypassing the scanner.
    ///
    /// Returns `true` when the name was new to the fingerprint's group.
    pub fn insert(&mut self, fingerprint: &[u8], name: &[u8]) -> bool {
        let fingerprint = self.interner.intern(fingerprint);
        let name = self.interner.intern(name);
        self.store.upsert(fingerprint, name)
    }

    /// Counters accumulated over every ingest so far.
    #[must_use]
    pub fn totals(&self) -> IngestSummary {
        self.totals
    }

    /// The string pool.
    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// The grouping store.
    #[must_use]
    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    /// Resolve every group with more than one distinct name.
    #[must_use]
    pub fn report(&self) -> Vec<ReportGroup<'_>> {
        self.store
            .duplicate_groups()
            .map(|(fingerprint, group)| ReportGroup {
                fingerprint: self.interner.resolve(fingerprint),
                names: group
                    .members()
                    .map(|name| self.interner.resolve(name))
                    .collect(),
            })
            .collect()
    }
}
