// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading and writing the keyfile text format.
//!
//! The format is line oriented:
//!
//! ```text
//! [general]
//! volume=100
//! # comment
//! shuffle=TRUE
//! ```
//!
//! A line starting with `[` names a section (the text up to the first `]`,
//! taken verbatim). A line starting with `#` is a comment. Inside a section,
//! a line containing `=` is split at the first `=` into key and value. Every
//! other line is ignored. There is no quoting or escaping: keys cannot contain
//! `=`, section names cannot contain `]`, and no value can span lines.

use crate::domain::{Keyfile, Result};
use std::io::{self, BufRead, Read, Write};

/// Longest line, in bytes, the parser looks at. Longer lines are cut here.
pub const MAX_LINE_LEN: usize = 4096;

/// Where entry lines currently go while parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    /// No section header seen yet.
    Nowhere,
    /// The section at this index.
    Section(usize),
    /// Below a duplicate section header; entries are dropped.
    Discard,
}

/// Parser and serializer for the keyfile format.
///
/// # Examples
///
/// ```
/// use mcs::adapters::KeyfileFormat;
///
/// let format = KeyfileFormat::new();
/// let keyfile = format.parse_str("[general]\nvolume=100\n");
/// assert_eq!(keyfile.get("general", "volume"), Some("100"));
///
/// assert_eq!(format.render(&keyfile), "[general]\nvolume=100\n");
/// ```
#[derive(Debug, Clone)]
pub struct KeyfileFormat {
    max_line_len: usize,
}

impl KeyfileFormat {
    /// Creates a format with the default line limit.
    pub fn new() -> Self {
        Self {
            max_line_len: MAX_LINE_LEN,
        }
    }

    /// Sets the line limit in bytes.
    pub fn max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Parses a keyfile from `reader`.
    ///
    /// Duplicate sections and keys are logged and the first occurrence kept;
    /// they never fail the parse. Only a read error does.
    pub fn parse<R: BufRead>(&self, mut reader: R) -> Result<Keyfile> {
        let mut keyfile = Keyfile::new();
        let mut target = Target::Nowhere;
        let mut buf = Vec::with_capacity(self.max_line_len);
        let mut line_no = 0usize;

        loop {
            buf.clear();
            let limit = self.max_line_len as u64 + 1;
            if reader.by_ref().take(limit).read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            if buf.last() == Some(&b'\n') {
                buf.pop();
            } else if buf.len() > self.max_line_len {
                let skipped = skip_line(&mut reader)?;
                tracing::debug!(
                    "Line {} is {} bytes long, truncating to {}",
                    line_no,
                    buf.len() + skipped,
                    self.max_line_len
                );
                buf.truncate(self.max_line_len);
            }

            let line = String::from_utf8_lossy(&buf);
            target = Self::parse_line(&line, line_no, &mut keyfile, target);
        }

        Ok(keyfile)
    }

    /// Parses a keyfile held in memory.
    pub fn parse_str(&self, content: &str) -> Keyfile {
        let mut keyfile = Keyfile::new();
        let mut target = Target::Nowhere;

        for (index, line) in content.split('\n').enumerate() {
            let line = truncate_at_boundary(line, self.max_line_len);
            target = Self::parse_line(line, index + 1, &mut keyfile, target);
        }

        keyfile
    }

    fn parse_line(line: &str, line_no: usize, keyfile: &mut Keyfile, target: Target) -> Target {
        if let Some(header) = line.strip_prefix('[') {
            let Some(end) = header.find(']') else {
                return target;
            };
            let name = &header[..end];
            return match keyfile.push_section(name) {
                Some(index) => Target::Section(index),
                None => {
                    tracing::warn!(
                        "Line {}: duplicate section '{}', ignoring its entries",
                        line_no,
                        name
                    );
                    Target::Discard
                }
            };
        }

        if line.starts_with('#') {
            return target;
        }

        let Target::Section(index) = target else {
            return target;
        };
        let Some((key, value)) = line.split_once('=') else {
            return target;
        };
        if value.is_empty() {
            return target;
        }

        if let Some(section) = keyfile.section_at_mut(index) {
            if !section.insert_new(key, value) {
                tracing::warn!(
                    "Line {}: duplicate key '{}' in section '{}', keeping the first value",
                    line_no,
                    key,
                    section.name()
                );
            }
        }
        target
    }

    /// Writes `keyfile` to `writer`.
    ///
    /// Sections without entries are left out. Sections are separated by a
    /// blank line.
    pub fn write<W: Write>(&self, keyfile: &Keyfile, mut writer: W) -> Result<()> {
        let mut first = true;
        for section in keyfile.sections().iter().filter(|s| !s.is_empty()) {
            if !first {
                writeln!(writer)?;
            }
            first = false;

            writeln!(writer, "[{}]", section.name())?;
            for entry in section.entries() {
                writeln!(writer, "{}={}", entry.key(), entry.value())?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Renders `keyfile` as text.
    pub fn render(&self, keyfile: &Keyfile) -> String {
        let mut out = String::new();
        for section in keyfile.sections().iter().filter(|s| !s.is_empty()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push('[');
            out.push_str(section.name());
            out.push_str("]\n");
            for entry in section.entries() {
                out.push_str(entry.key());
                out.push('=');
                out.push_str(entry.value());
                out.push('\n');
            }
        }
        out
    }
}

impl Default for KeyfileFormat {
    fn default() -> Self {
        Self::new()
    }
}

/// Cuts `line` to at most `max` bytes without splitting a character.
fn truncate_at_boundary(line: &str, max: usize) -> &str {
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// Consumes the rest of the current line, including its `\n`, without
/// buffering it. Returns the number of bytes dropped before the `\n`.
fn skip_line<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut skipped = 0;
    loop {
        let (used, done) = {
            let available = reader.fill_buf()?;
            if available.is_empty() {
                return Ok(skipped);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(end) => (end + 1, true),
                None => (available.len(), false),
            }
        };
        reader.consume(used);
        if done {
            return Ok(skipped + used - 1);
        }
        skipped += used;
    }
}
