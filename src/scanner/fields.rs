//! Byte-level field isolation for one input line.
//!
//! # Overview
//!
//! The scanner walks a line in three steps:
//! 1. **Fingerprint**: bytes up to the first separator. A newline or end of
//!    input before any separator makes the line malformed; more than
//!    `max_fingerprint_len` bytes makes it oversized.
//! 2. **Separator**: one or more separator bytes are skipped.
//! 3. **Name**: every byte up to the newline, separators included. Bytes
//!    past `max_name_len` are dropped and the line is reported truncated.
//!
//! Whenever a step stops before the newline, the rest of the line is
//! drained so the next call starts at the beginning of the next line.
//!
//! All buffered reads go through [`BufRead::fill_buf`] and
//! [`BufRead::consume`], so fields are copied a chunk at a time instead of
//! byte by byte.

use std::io::{self, BufRead};

use super::{is_separator, FieldLimits, LineOutcome, Record, LINE_FEED};

/// How the fingerprint field ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FingerprintEnd {
    /// A separator byte was consumed.
    Separator,
    /// A newline was consumed before any separator.
    Newline,
    /// Input ended before any separator.
    EndOfStream,
    /// The field grew past the limit. The terminator is still unconsumed.
    Overflow,
}

/// Streaming scanner producing one [`LineOutcome`] per input line.
#[derive(Debug)]
pub struct FieldScanner<R> {
    reader: R,
    limits: FieldLimits,
    fingerprint: Vec<u8>,
    name: Vec<u8>,
    lines_scanned: u64,
}

impl<R: BufRead> FieldScanner<R> {
    /// Create a scanner over a buffered reader.
    #[must_use]
    pub fn new(reader: R, limits: FieldLimits) -> Self {
        Self {
            reader,
            limits,
            fingerprint: Vec::with_capacity(limits.max_fingerprint_len.min(4096)),
            name: Vec::with_capacity(limits.max_name_len.min(4096)),
            lines_scanned: 0,
        }
    }

    /// Limits this scanner enforces.
    #[must_use]
    pub fn limits(&self) -> FieldLimits {
        self.limits
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn lines_scanned(&self) -> u64 {
        self.lines_scanned
    }

    /// Scan the next line.
    ///
    /// Returns `Ok(None)` once the input is exhausted. Otherwise exactly one
    /// line (through its newline, or through end of input for a final line
    /// without one) has been consumed, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if reading fails. Malformed content
    /// is never an error; it is reported through the outcome.
    pub fn scan_line(&mut self) -> io::Result<Option<LineOutcome<'_>>> {
        self.fingerprint.clear();
        self.name.clear();

        if self.at_end()? {
            return Ok(None);
        }
        self.lines_scanned += 1;

        match self.read_fingerprint()? {
            FingerprintEnd::Newline | FingerprintEnd::EndOfStream => {
                return Ok(Some(LineOutcome::MalformedLine));
            }
            FingerprintEnd::Overflow => {
                self.discard_line()?;
                return Ok(Some(LineOutcome::OversizedFingerprint));
            }
            FingerprintEnd::Separator => {}
        }

        // A separator as the very first byte leaves nothing to group by.
        if self.fingerprint.is_empty() {
            self.discard_line()?;
            return Ok(Some(LineOutcome::MalformedLine));
        }

        self.skip_separators()?;
        let truncated = self.read_name()?;

        let record = Record {
            fingerprint: &self.fingerprint,
            name: &self.name,
        };
        Ok(Some(if truncated {
            LineOutcome::NameTruncated(record)
        } else {
            LineOutcome::Success(record)
        }))
    }

    /// Skip separator bytes and return the first byte of the name field
    /// without consuming it. `None` means input ended.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if reading fails.
    pub fn skip_separators(&mut self) -> io::Result<Option<u8>> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(None);
            }

            match buf.iter().position(|&b| !is_separator(b)) {
                Some(idx) => {
                    let first = buf[idx];
                    self.reader.consume(idx);
                    return Ok(Some(first));
                }
                None => {
                    let len = buf.len();
                    self.reader.consume(len);
                }
            }
        }
    }

    /// Drop everything up to and including the next newline.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if reading fails.
    pub fn discard_line(&mut self) -> io::Result<()> {
        self.reader.skip_until(LINE_FEED)?;
        Ok(())
    }

    fn at_end(&mut self) -> io::Result<bool> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.is_empty()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_fingerprint(&mut self) -> io::Result<FingerprintEnd> {
        let max = self.limits.max_fingerprint_len;
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(FingerprintEnd::EndOfStream);
            }

            let stop = buf
                .iter()
                .position(|&b| b == LINE_FEED || is_separator(b));
            let content_len = stop.unwrap_or(buf.len());

            if self.fingerprint.len() + content_len > max {
                self.reader.consume(content_len);
                return Ok(FingerprintEnd::Overflow);
            }
            self.fingerprint.extend_from_slice(&buf[..content_len]);

            match stop {
                Some(idx) => {
                    let terminator = buf[idx];
                    self.reader.consume(idx + 1);
                    return Ok(if terminator == LINE_FEED {
                        FingerprintEnd::Newline
                    } else {
                        FingerprintEnd::Separator
                    });
                }
                None => self.reader.consume(content_len),
            }
        }
    }

    /// Returns `true` when the name had to be truncated.
    fn read_name(&mut self) -> io::Result<bool> {
        let max = self.limits.max_name_len;
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(false);
            }

            let newline = buf.iter().position(|&b| b == LINE_FEED);
            let content_len = newline.unwrap_or(buf.len());
            let room = max.saturating_sub(self.name.len());

            if content_len > room {
                self.name.extend_from_slice(&buf[..room]);
                match newline {
                    Some(idx) => self.reader.consume(idx + 1),
                    None => {
                        self.reader.consume(content_len);
                        self.discard_line()?;
                    }
                }
                return Ok(true);
            }

            self.name.extend_from_slice(&buf[..content_len]);
            match newline {
                Some(idx) => {
                    self.reader.consume(idx + 1);
                    return Ok(false);
                }
                None => self.reader.consume(content_len),
            }
        }
    }
}
