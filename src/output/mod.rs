//! Output formatters for grouping results.
//!
//! This module provides different output formats for the report:
//! - Plain text, one name per line, for pipelines (the default)
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```
//! use fgroups::grouping::Grouper;
//! use fgroups::output::TextOutput;
//! use fgroups::scanner::FieldLimits;
//!
//! let mut grouper = Grouper::new(FieldLimits::default());
//! grouper.ingest(&b"k1 same\nk1 same\nk1 other\n"[..]).unwrap();
//!
//! let report = grouper.report();
//! let mut out = Vec::new();
//! TextOutput::new(&report).write_to(&mut out).unwrap();
//!
//! // Two distinct names, one per line
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text.lines().count(), 2);
//! assert!(text.contains("same\n") && text.contains("other\n"));
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::TextOutput;
