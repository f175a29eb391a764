//! Grouping engine.
//!
//! This module provides functionality for:
//! - Interning fingerprints and names into cheap [`Symbol`] handles
//! - Collecting the distinct names per fingerprint ([`GroupStore`])
//! - Driving the scanner over an input stream ([`Grouper`])

pub mod engine;
pub mod interner;
pub mod store;

pub use engine::{GroupError, Grouper, IngestSummary, ReportGroup};
pub use interner::{Interner, Symbol};
pub use store::{Group, GroupStore, DEFAULT_STORE_CAPACITY};
