//! fgroups - Fingerprint Grouping
//!
//! Reads `<fingerprint><whitespace><name>` lines, collects the distinct names
//! seen under each fingerprint, and reports every fingerprint shared by two or
//! more distinct names. Typical input is the output of a checksum tool, where
//! the report lists files with identical content.

pub mod cli;
pub mod config;
pub mod error;
pub mod grouping;
pub mod logging;
pub mod output;
pub mod scanner;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::ExitCode;
use crate::grouping::Grouper;
use crate::output::{JsonOutput, TextOutput};

/// Run the application with parsed CLI arguments.
///
/// The whole input is grouped before anything is written to stdout, so a
/// failed run never leaves a partial report behind.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be
/// opened or read, or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config
        .merge_cli(&cli)
        .context("Invalid command-line option")?;
    log::debug!("Effective configuration: {:?}", config);

    let mut grouper = Grouper::new(config.limits());
    match cli.input_path() {
        Some(path) => {
            log::debug!("Reading records from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            grouper
                .ingest(BufReader::new(file))
                .with_context(|| format!("Failed to read input {}", path.display()))?;
        }
        None => {
            log::debug!("Reading records from stdin");
            grouper
                .ingest(io::stdin().lock())
                .context("Failed to read standard input")?;
        }
    }

    let totals = grouper.totals();
    let report = grouper.report();
    log::debug!(
        "{} distinct fingerprints, {} shared by 2+ names, {} interned strings ({} bytes)",
        grouper.store().len(),
        report.len(),
        grouper.interner().len(),
        grouper.interner().stored_bytes()
    );
    if totals.has_issues() {
        log::debug!(
            "{} of {} lines discarded, {} names truncated",
            totals.discarded_lines(),
            totals.lines,
            totals.truncated_names
        );
    }

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());
    match config.output {
        OutputFormat::Text => TextOutput::new(&report)
            .write_to(writer)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(
            &report,
            &totals,
            grouper.store().len(),
            ExitCode::Success,
        )
        .write_to(writer)
        .context("Failed to write report")?,
    }

    Ok(ExitCode::Success)
}
