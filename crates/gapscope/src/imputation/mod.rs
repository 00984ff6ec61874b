//! Time-series imputation.
//!
//! Missing metric values are forward-filled per entity: a gap at period `P`
//! takes the most recent known value at a period before `P`. There is no
//! backward fill, no interpolation and no borrowing across entities, so a
//! gap before an entity's first known value stays missing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{Metric, Row};

/// Which metrics are forward-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputationConfig {
    pub econ: bool,
    pub social: bool,
    pub physical: bool,
    pub total: bool,
}

impl Default for ImputationConfig {
    fn default() -> Self {
        Self {
            econ: true,
            social: true,
            physical: true,
            total: true,
        }
    }
}

impl ImputationConfig {
    /// Imputation disabled for every metric.
    pub fn none() -> Self {
        Self {
            econ: false,
            social: false,
            physical: false,
            total: false,
        }
    }

    pub fn enabled(&self, metric: Metric) -> bool {
        match metric {
            Metric::Econ => self.econ,
            Metric::Social => self.social,
            Metric::Physical => self.physical,
            Metric::Total => self.total,
        }
    }

    /// Builder-style toggle for one metric.
    pub fn with(mut self, metric: Metric, enabled: bool) -> Self {
        match metric {
            Metric::Econ => self.econ = enabled,
            Metric::Social => self.social = enabled,
            Metric::Physical => self.physical = enabled,
            Metric::Total => self.total = enabled,
        }
        self
    }
}

/// Number of cells filled per metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputeStats {
    pub econ: usize,
    pub social: usize,
    pub physical: usize,
    pub total: usize,
}

impl ImputeStats {
    pub fn filled(&self, metric: Metric) -> usize {
        match metric {
            Metric::Econ => self.econ,
            Metric::Social => self.social,
            Metric::Physical => self.physical,
            Metric::Total => self.total,
        }
    }

    pub fn total_filled(&self) -> usize {
        self.econ + self.social + self.physical + self.total
    }

    fn bump(&mut self, metric: Metric) {
        match metric {
            Metric::Econ => self.econ += 1,
            Metric::Social => self.social += 1,
            Metric::Physical => self.physical += 1,
            Metric::Total => self.total += 1,
        }
    }
}

/// Forward-fill imputer.
#[derive(Debug, Clone, Default)]
pub struct Imputer {
    config: ImputationConfig,
}

impl Imputer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ImputationConfig) -> Self {
        Self { config }
    }

    /// Forward-fill `rows`, returning them ordered by (entity, period).
    ///
    /// Filled cells keep their `raw` field and get `imputed` set. Running
    /// this on already imputed rows changes nothing.
    pub fn impute(&self, mut rows: Vec<Row>) -> (Vec<Row>, ImputeStats) {
        rows.sort_by(|a, b| a.entity.cmp(&b.entity).then(a.period.cmp(&b.period)));

        let metrics: Vec<Metric> = Metric::ALL
            .into_iter()
            .filter(|m| self.config.enabled(*m))
            .collect();

        let mut stats = ImputeStats::default();
        let mut carry: [Option<f64>; 4] = [None; 4];
        let mut current_entity: Option<String> = None;

        for row in rows.iter_mut() {
            if current_entity.as_deref() != Some(row.entity.as_str()) {
                carry = [None; 4];
                current_entity = Some(row.entity.clone());
            }

            for (slot, &metric) in metrics.iter().enumerate() {
                let cell = row.metrics.get_mut(metric);
                match cell.value {
                    Some(v) => carry[slot] = Some(v),
                    None => {
                        if let Some(previous) = carry[slot] {
                            cell.value = Some(previous);
                            cell.imputed = true;
                            stats.bump(metric);
                        }
                    }
                }
            }
        }

        debug!(filled = stats.total_filled(), rows = rows.len(), "forward-filled missing values");
        (rows, stats)
    }
}
