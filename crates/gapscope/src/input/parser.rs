//! Delimited text parser with delimiter detection.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::source::{DataTable, SourceMetadata};
use crate::error::{GapscopeError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Parses delimited text into a [`DataTable`].
///
/// Quoted fields may contain the delimiter, line breaks, and doubled quote
/// characters (`""` is one literal quote). A quote anywhere outside a quoted
/// section toggles quote mode, so `a"b,c"d` is the single field `ab,cd`.
/// Both `\n` and `\r\n` line endings are accepted and blank lines are
/// skipped. Input without a header and at
/// least one data record parses to an empty table rather than an error.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Read and parse a file from disk.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GapscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(self.parse_source(file_label(path), Some(path.to_path_buf()), &text))
    }

    /// Parse text that was already read, recording where it came from.
    pub fn parse_source(
        &self,
        label: impl Into<String>,
        path: Option<PathBuf>,
        text: &str,
    ) -> (DataTable, SourceMetadata) {
        let table = self.parse_str(text);
        let metadata = SourceMetadata::describe(label, path, text, &table);
        (table, metadata)
    }

    /// Parse text directly.
    pub fn parse_str(&self, text: &str) -> DataTable {
        let delimiter = self
            .config
            .delimiter
            .unwrap_or_else(|| detect_delimiter(text));

        let text = requote_fields(text, delimiter, self.config.quote);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .double_quote(true)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records: Vec<Vec<String>> = Vec::new();
        for (idx, result) in reader.byte_records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!(record = idx, error = %e, "stopping parse at unreadable record");
                    break;
                }
            };

            let fields: Vec<String> = record
                .iter()
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect();

            if is_blank_record(&fields) {
                continue;
            }
            records.push(fields);
        }

        if records.len() < 2 {
            debug!(records = records.len(), "not enough records for header plus data");
            return DataTable::empty(delimiter);
        }

        let headers = records.remove(0);
        debug!(columns = headers.len(), rows = records.len(), "parsed delimited text");
        DataTable::new(headers, records, delimiter)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A line holding nothing but whitespace.
fn is_blank_record(fields: &[String]) -> bool {
    fields.len() <= 1 && fields.iter().all(|f| f.trim().is_empty())
}

/// Rewrite every field that contains a quote into fully quoted form.
///
/// The csv reader only honors a quote at the start of a field. Here a quote
/// outside a quoted section opens one wherever it appears, and a lone quote
/// inside closes it, so each field is re-emitted wrapped in quotes with its
/// literal quotes doubled. Text without quotes is returned untouched.
fn requote_fields(text: &str, delimiter: u8, quote: u8) -> Cow<'_, str> {
    let (delimiter, quote) = (delimiter as char, quote as char);
    if !text.contains(quote) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut in_quotes = false;
    let mut open = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == quote {
            if !open {
                out.push(quote);
                open = true;
            }
            if in_quotes && chars.peek() == Some(&quote) {
                chars.next();
                out.push(quote);
                out.push(quote);
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }

        if !in_quotes && (ch == delimiter || ch == '\n' || ch == '\r') {
            if open {
                out.push(quote);
                open = false;
            }
            out.push(ch);
            continue;
        }

        if !open {
            out.push(quote);
            open = true;
        }
        out.push(ch);
    }

    if open {
        out.push(quote);
    }
    Cow::Owned(out)
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Falls back to a comma when no candidate appears at all.
pub fn detect_delimiter(text: &str) -> u8 {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let Some(&first_count) = counts.first() else {
            continue;
        };
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
