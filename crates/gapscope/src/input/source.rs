//! Parsed table and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata about the text a dataset was loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path (or a caller-supplied label).
    pub file: String,
    /// Full path to the file, when the text came from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the raw text.
    pub hash: String,
    /// Size of the raw text in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data records (excluding header).
    pub record_count: usize,
    /// Number of header columns.
    pub column_count: usize,
    /// When the text was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe `text` after it has been parsed into `table`.
    pub fn describe(label: impl Into<String>, path: Option<PathBuf>, text: &str, table: &DataTable) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());

        Self {
            file: label.into(),
            path,
            hash: format!("sha256:{:x}", hasher.finalize()),
            size_bytes: text.len() as u64,
            format: format_name(table.delimiter).to_string(),
            record_count: table.row_count(),
            column_count: table.column_count(),
            loaded_at: Utc::now(),
        }
    }
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Parsed delimited text: one header record plus data records.
///
/// Records keep their original width; a short record simply has fewer
/// fields and lookups past its end yield `None`.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    /// Header record.
    pub headers: Vec<String>,
    /// Data records (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// An empty table, produced when the input has no header plus data.
    pub fn empty(delimiter: u8) -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            delimiter,
        }
    }

    /// True when there is nothing to normalize.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}
