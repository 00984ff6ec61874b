//! Gapscope: equality score time series for country reports.
//!
//! Gapscope reads a per-country, per-year table of equality sub-scores,
//! repairs gaps by forward-filling, indexes the result by country and year,
//! and answers report queries: trend indicators against the previous year,
//! the weakest category with its severity, and a randomized selection of
//! recommendations and suggested actions.
//!
//! # Pipeline
//!
//! - **Parser**: delimited text into records (quoted fields, CRLF, blank lines)
//! - **Normalizer**: header spellings resolved to a canonical row shape
//! - **Imputer**: per-entity forward-fill, original values kept alongside
//! - **Index**: entity → period → row, built once per load
//! - **Analysis**: trend and severity tiers
//! - **Content**: worst-category selection from a content bank
//!
//! # Example
//!
//! ```no_run
//! use gapscope::Gapscope;
//!
//! let gapscope = Gapscope::new();
//! let snapshot = gapscope.load_file("country_year_scores.csv").unwrap();
//! let mut rng = fastrand::Rng::new();
//!
//! if let Some(report) = gapscope.report(&snapshot, None, "FRA", 2021, &mut rng) {
//!     println!("{}: worst category {:?}", report.name, report.worst_category);
//!     for text in &report.recommendations {
//!         println!("- {}", text);
//!     }
//! }
//! ```

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod imputation;
pub mod index;
pub mod input;
pub mod loader;
pub mod schema;

mod gapscope;

pub use crate::gapscope::{DatasetSnapshot, EntityReport, Gapscope, LoadReport, MetricReading};
pub use analysis::{Direction, SeverityScale, SeverityTier, Trend};
pub use catalog::{CountryCatalog, CountryMeta};
pub use config::GapscopeConfig;
pub use content::{ContentBank, ContentEntry};
pub use error::{GapscopeError, Result};
pub use index::{DuplicatePolicy, IndexedDataset, PeriodOrder};
pub use input::{DataTable, SourceMetadata};
pub use loader::{DatasetHandle, LoadStatus, LoadTicket};
pub use schema::{Category, Metric, Row};
