//! Command-line interface definitions for fgroups.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Group records from stdin (e.g. "<hash> <path>" lines)
//! find . -type f -exec md5sum {} + | fgroups
//!
//! # Group records from a file, JSON report
//! fgroups sums.txt --output json
//!
//! # Raise the name limit for very long paths
//! fgroups sums.txt --max-name-len 8191
//!
//! # Verbose mode for debugging
//! fgroups -v sums.txt
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Print the names that share a fingerprint.
///
/// Reads lines of the form `<fingerprint><whitespace><name>` and prints every
/// group of two or more distinct names with the same fingerprint, one name
/// per line, groups separated by a blank line.
#[derive(Debug, Parser)]
#[command(name = "fgroups")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Input file to read records from ("-" or absent for stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output format (text for one name per line, json for scripting)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Longest accepted fingerprint in bytes (longer lines are discarded)
    #[arg(long, value_name = "BYTES")]
    pub max_fingerprint_len: Option<usize>,

    /// Longest stored name in bytes (longer names are truncated)
    #[arg(long, value_name = "BYTES")]
    pub max_name_len: Option<usize>,

    /// Path to a TOML configuration file
    ///
    /// If not specified, a default platform-specific path is used when present.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

impl Cli {
    /// The input path, or `None` when reading from stdin.
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One name per line, groups separated by a blank line
    #[default]
    Text,
    /// JSON report with fingerprints and statistics
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
