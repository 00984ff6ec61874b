//! Canonical data model: metrics, rows, and header resolution.

mod columns;
mod metric;
mod row;

pub use columns::{CanonicalField, ColumnMap, normalize_header};
pub use metric::{Category, Metric};
pub use row::{MetricCell, MetricCells, Row};
