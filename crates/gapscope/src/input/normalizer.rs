//! Row normalization: header resolution and numeric coercion.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::source::DataTable;
use crate::schema::{CanonicalField, ColumnMap, Metric, MetricCell, MetricCells, Row};

/// Normalizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// A literal number that also means "missing".
    ///
    /// The scores file marks gaps with blank fields, so this is off by
    /// default. When set, a field equal to it keeps the number in
    /// [`MetricCell::raw`] but has no effective value.
    pub missing_sentinel: Option<f64>,
}

/// Counts gathered while normalizing a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    /// Data records seen.
    pub records: usize,
    /// Records dropped because the identifier was blank.
    pub dropped_missing_entity: usize,
    /// Records dropped because the period was absent or not a finite number.
    pub dropped_bad_period: usize,
}

impl NormalizeStats {
    pub fn dropped(&self) -> usize {
        self.dropped_missing_entity + self.dropped_bad_period
    }
}

/// Maps parsed records onto the canonical [`Row`] shape.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize every data record of `table`.
    ///
    /// Records without an identifier or a usable period are dropped and
    /// counted. Metric columns that did not resolve are missing in every row.
    pub fn normalize(&self, table: &DataTable) -> (Vec<Row>, NormalizeStats) {
        let mut stats = NormalizeStats {
            records: table.row_count(),
            ..Default::default()
        };
        if table.is_empty() {
            return (Vec::new(), stats);
        }

        let columns = ColumnMap::resolve(&table.headers);
        let missing = columns.missing_required();
        if !missing.is_empty() {
            warn!(?missing, headers = ?table.headers, "required columns not found, no rows usable");
        }
        for field in columns.unresolved().into_iter().filter(|f| !f.is_required()) {
            debug!(?field, "optional column not found, treating as missing");
        }

        let mut rows = Vec::with_capacity(table.row_count());
        for (idx, record) in table.rows.iter().enumerate() {
            let field = |f: CanonicalField| field_value(&columns, record, f);

            let entity = field(CanonicalField::Entity).map(str::trim).unwrap_or_default();
            if entity.is_empty() {
                stats.dropped_missing_entity += 1;
                debug!(record = idx + 1, "dropping record without identifier");
                continue;
            }

            let Some(period) = field(CanonicalField::Period).and_then(parse_period) else {
                stats.dropped_bad_period += 1;
                debug!(record = idx + 1, entity, "dropping record without usable period");
                continue;
            };

            let mut metrics = MetricCells::default();
            for metric in Metric::ALL {
                let raw = field(CanonicalField::Metric(metric)).and_then(parse_number);
                *metrics.get_mut(metric) = self.cell(raw);
            }

            rows.push(Row {
                entity: entity.to_string(),
                period,
                metrics,
            });
        }

        if stats.dropped() > 0 {
            warn!(
                missing_entity = stats.dropped_missing_entity,
                bad_period = stats.dropped_bad_period,
                "dropped malformed records"
            );
        }
        debug!(rows = rows.len(), "normalized records");
        (rows, stats)
    }

    fn cell(&self, raw: Option<f64>) -> MetricCell {
        let value = match (raw, self.config.missing_sentinel) {
            (Some(v), Some(sentinel)) if v == sentinel => None,
            (v, _) => v,
        };
        MetricCell {
            raw,
            value,
            imputed: false,
        }
    }
}

fn field_value<'a>(columns: &ColumnMap, record: &'a [String], field: CanonicalField) -> Option<&'a str> {
    columns
        .index_of(field)
        .and_then(|i| record.get(i))
        .map(|s| s.as_str())
}

/// Parse a metric field. Blank, null-like, unparsable and non-finite values
/// are all `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    if DataTable::is_null_value(value) {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a period field. Fractional values are truncated toward zero.
pub fn parse_period(value: &str) -> Option<i32> {
    let n = parse_number(value)?.trunc();
    if n < i32::MIN as f64 || n > i32::MAX as f64 {
        return None;
    }
    Some(n as i32)
}
