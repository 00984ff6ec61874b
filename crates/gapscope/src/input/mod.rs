//! Input parsing, normalization and data source handling.

mod normalizer;
mod parser;
mod source;

pub use normalizer::{NormalizeStats, Normalizer, NormalizerConfig, parse_number, parse_period};
pub use parser::{Parser, ParserConfig, detect_delimiter};
pub use source::{DataTable, SourceMetadata};
