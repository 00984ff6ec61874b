//! Canonical row shape.

use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// One metric value as loaded and as used.
///
/// `raw` is the number parsed from the source field. `value` is what
/// consumers should read: it is `None` when the field was blank, unparsable
/// or matched the configured missing sentinel, and carries the forward-filled
/// number when `imputed` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricCell {
    pub raw: Option<f64>,
    pub value: Option<f64>,
    #[serde(default)]
    pub imputed: bool,
}

impl MetricCell {
    /// A cell whose effective value is the raw value.
    pub fn known(value: f64) -> Self {
        Self {
            raw: Some(value),
            value: Some(value),
            imputed: false,
        }
    }

    /// A blank cell.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

/// The four metric cells of a row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricCells {
    pub econ: MetricCell,
    pub social: MetricCell,
    pub physical: MetricCell,
    pub total: MetricCell,
}

impl MetricCells {
    pub fn get(&self, metric: Metric) -> &MetricCell {
        match metric {
            Metric::Econ => &self.econ,
            Metric::Social => &self.social,
            Metric::Physical => &self.physical,
            Metric::Total => &self.total,
        }
    }

    pub fn get_mut(&mut self, metric: Metric) -> &mut MetricCell {
        match metric {
            Metric::Econ => &mut self.econ,
            Metric::Social => &mut self.social,
            Metric::Physical => &mut self.physical,
            Metric::Total => &mut self.total,
        }
    }
}

/// One entity's metrics for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Stable entity identifier (e.g. ISO3 country code), trimmed and non-empty.
    pub entity: String,
    /// Ordering key (e.g. year).
    pub period: i32,
    pub metrics: MetricCells,
}

impl Row {
    /// Create a row with every metric missing.
    pub fn new(entity: impl Into<String>, period: i32) -> Self {
        Self {
            entity: entity.into(),
            period,
            metrics: MetricCells::default(),
        }
    }

    /// Set a metric to a known value.
    pub fn with_value(mut self, metric: Metric, value: f64) -> Self {
        *self.metrics.get_mut(metric) = MetricCell::known(value);
        self
    }

    /// Effective value of a metric (possibly forward-filled).
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric).value
    }

    pub fn cell(&self, metric: Metric) -> &MetricCell {
        self.metrics.get(metric)
    }

    /// Key used for uniqueness and indexing.
    pub fn key(&self) -> (&str, i32) {
        (&self.entity, self.period)
    }
}
