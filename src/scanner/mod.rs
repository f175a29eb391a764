//! Record scanner for the `<fingerprint><whitespace><name>\n` line format.
//!
//! This module provides functionality for:
//! - Isolating the fingerprint and name fields of one input line
//! - Skipping the separator whitespace between the two fields
//! - Recovering from malformed or oversized lines without losing sync
//!
//! # Architecture
//!
//! - [`fields`]: the byte-level [`FieldScanner`] state machine
//!
//! Every call to [`FieldScanner::scan_line`] consumes exactly one input line,
//! whatever the outcome, so a bad line can never bleed into the next one.
//!
//! # Example
//!
//! ```
//! use fgroups::scanner::{FieldLimits, FieldScanner, LineOutcome};
//!
//! let input: &[u8] = b"abc123 file1.txt\nbroken\n";
//! let mut scanner = FieldScanner::new(input, FieldLimits::default());
//!
//! match scanner.scan_line().unwrap() {
//!     Some(LineOutcome::Success(record)) => {
//!         assert_eq!(record.fingerprint, b"abc123");
//!         assert_eq!(record.name, b"file1.txt");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//!
//! assert!(matches!(scanner.scan_line().unwrap(), Some(LineOutcome::MalformedLine)));
//! assert!(scanner.scan_line().unwrap().is_none());
//! ```

pub mod fields;

pub use fields::FieldScanner;

/// Default maximum fingerprint length in bytes.
pub const DEFAULT_MAX_FINGERPRINT_LEN: usize = 511;

/// Default maximum name length in bytes.
pub const DEFAULT_MAX_NAME_LEN: usize = 2047;

/// Line terminator.
pub const LINE_FEED: u8 = b'\n';

/// Check whether a byte separates the fingerprint from the name.
///
/// Space, tab, vertical tab, form feed and carriage return count as
/// separators. Newline does not: it terminates the line.
#[must_use]
pub fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | 0x0B | 0x0C | b'\r')
}

/// Size limits for the two fields of a line, in bytes of payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    /// Longest accepted fingerprint. One more byte makes the line oversized.
    pub max_fingerprint_len: usize,
    /// Longest stored name. Longer names are truncated to this length.
    pub max_name_len: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            max_fingerprint_len: DEFAULT_MAX_FINGERPRINT_LEN,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl FieldLimits {
    /// Create limits from explicit values.
    #[must_use]
    pub fn new(max_fingerprint_len: usize, max_name_len: usize) -> Self {
        Self {
            max_fingerprint_len,
            max_name_len,
        }
    }

    /// Set the maximum fingerprint length.
    #[must_use]
    pub fn with_max_fingerprint_len(mut self, len: usize) -> Self {
        self.max_fingerprint_len = len;
        self
    }

    /// Set the maximum name length.
    #[must_use]
    pub fn with_max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = len;
        self
    }
}

/// A successfully isolated (fingerprint, name) pair.
///
/// Borrows the scanner's field buffers, so it is only valid until the
/// next call to [`FieldScanner::scan_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Grouping key field
    pub fingerprint: &'a [u8],
    /// Value field, possibly truncated
    pub name: &'a [u8],
}

/// Classified result of scanning one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// Both fields parsed within bounds.
    Success(Record<'a>),
    /// The name was longer than the limit; the truncated record is delivered.
    NameTruncated(Record<'a>),
    /// The fingerprint field ended without a separator. Line discarded.
    MalformedLine,
    /// The fingerprint field exceeded the limit. Line discarded.
    OversizedFingerprint,
}

impl<'a> LineOutcome<'a> {
    /// The record to group, if the line produced one.
    #[must_use]
    pub fn record(&self) -> Option<Record<'a>> {
        match *self {
            Self::Success(record) | Self::NameTruncated(record) => Some(record),
            Self::MalformedLine | Self::OversizedFingerprint => None,
        }
    }

    /// The diagnostic to report for this line, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<LineError> {
        match self {
            Self::Success(_) => None,
            Self::NameTruncated(_) => Some(LineError::NameTruncated),
            Self::MalformedLine => Some(LineError::Malformed),
            Self::OversizedFingerprint => Some(LineError::OversizedFingerprint),
        }
    }
}

/// Per-line problems. None of these stop the run.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// A newline (or end of input) arrived inside the fingerprint field.
    #[error("Malformed input line: line discarded")]
    Malformed,

    /// The fingerprint was longer than the configured maximum.
    #[error("Fingerprint too large: line discarded")]
    OversizedFingerprint,

    /// The name was longer than the configured maximum.
    #[error("Name length exceeds max, truncating name...")]
    NameTruncated,
}

impl LineError {
    /// Whether the whole line was dropped (as opposed to kept truncated).
    #[must_use]
    pub fn discards_line(self) -> bool {
        !matches!(self, Self::NameTruncated)
    }
}
