//! Plain-text report: one name per line, groups separated by a blank line.
//!
//! Only groups with two or more distinct names are printed. There is no
//! header, no fingerprint and no blank line before the first or after the
//! last group. Names are written back byte-for-byte.

use std::io::{self, Write};

use crate::grouping::ReportGroup;

/// Plain-text output formatter.
pub struct TextOutput<'a> {
    groups: &'a [ReportGroup<'a>],
}

impl<'a> TextOutput<'a> {
    /// Create a new text output formatter.
    #[must_use]
    pub fn new(groups: &'a [ReportGroup<'a>]) -> Self {
        Self { groups }
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut printed = 0usize;
        for group in self.groups.iter().filter(|g| g.names.len() > 1) {
            if printed > 0 {
                writer.write_all(b"\n")?;
            }
            for name in &group.names {
                writer.write_all(name)?;
                writer.write_all(b"\n")?;
            }
            printed += 1;
        }
        writer.flush()
    }

    /// Render the report into a byte vector.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`TextOutput::write_to`].
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }
}
