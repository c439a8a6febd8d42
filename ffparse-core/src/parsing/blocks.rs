//! Splitting tabular listings into rows.
//!
//! ffmpeg prints its capability listings as a legend followed by one row per
//! entry (`DEV.LS h264   H.264 / AVC / MPEG-4 AVC`). `BlockParser` drops the
//! legend and splits the remaining lines into a bounded number of fields, so
//! the free-text description at the end of a row stays in one piece.

use crate::error::{CoreResult, missing_field_error};

/// Splits lines into fields after skipping a fixed preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockParser {
    header_lines: usize,
    separator: Option<char>,
    max_splits: usize,
    seen: usize,
    rows: Vec<Vec<String>>,
}

impl BlockParser {
    /// Whitespace-separated rows, split at most `max_splits` times.
    pub fn new(header_lines: usize, max_splits: usize) -> Self {
        Self {
            header_lines,
            separator: None,
            max_splits,
            seen: 0,
            rows: Vec::new(),
        }
    }

    /// Splits on `separator` instead of whitespace runs.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn header_lines(&self) -> usize {
        self.header_lines
    }

    /// Feeds one line.
    pub fn push(&mut self, line: &str) {
        self.seen += 1;
        if self.seen <= self.header_lines {
            return;
        }
        let fields = self.split(line);
        if !fields.is_empty() {
            self.rows.push(fields);
        }
    }

    /// Rows collected so far.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Batch form of `push`.
    pub fn parse<I, S>(mut self, lines: I) -> Vec<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.push(line.as_ref());
        }
        self.rows
    }

    fn split(&self, line: &str) -> Vec<String> {
        match self.separator {
            Some(separator) => {
                if line.trim().is_empty() {
                    return Vec::new();
                }
                line.splitn(self.max_splits + 1, separator)
                    .map(str::to_string)
                    .collect()
            }
            None => split_whitespace_n(line, self.max_splits),
        }
    }
}

/// Splits on whitespace runs at most `max_splits` times. The last field keeps
/// its interior whitespace; leading and trailing whitespace is ignored.
fn split_whitespace_n(line: &str, max_splits: usize) -> Vec<String> {
    let mut fields = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() {
        if fields.len() == max_splits {
            fields.push(rest.to_string());
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                fields.push(rest[..end].to_string());
                rest = rest[end..].trim_start();
            }
            None => {
                fields.push(rest.to_string());
                break;
            }
        }
    }
    fields
}

/// Field `index` of `row`, or `MissingField` naming what was expected there.
pub fn field<'a>(row: &'a [String], index: usize, name: &'static str) -> CoreResult<&'a str> {
    row.get(index)
        .map(String::as_str)
        .ok_or_else(|| missing_field_error(index, name, row))
}
