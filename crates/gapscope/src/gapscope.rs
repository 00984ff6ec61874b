//! Main Gapscope struct and public API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{SeverityTier, Trend, trend};
use crate::catalog::CountryCatalog;
use crate::config::GapscopeConfig;
use crate::content::{CategoryScores, ContentBank, Selection, builtin, select_for_scores};
use crate::error::Result;
use crate::imputation::{ImputeStats, Imputer};
use crate::index::{IndexedDataset, PeriodOrder, enforce_unique_keys};
use crate::input::{DataTable, NormalizeStats, Normalizer, Parser, SourceMetadata};
use crate::schema::{CanonicalField, Category, ColumnMap, Metric, MetricCell};

/// What happened to the records of one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data records read (excluding the header).
    pub records: usize,
    pub dropped_missing_entity: usize,
    pub dropped_bad_period: usize,
    /// Rows removed by the duplicate-key policy.
    pub duplicates_dropped: usize,
    /// Cells filled by forward-fill, per metric.
    pub imputed: ImputeStats,
    pub rows_indexed: usize,
    pub entities: usize,
    /// Canonical fields with no matching header.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved_columns: Vec<String>,
}

impl LoadReport {
    fn new(records: usize, normalize: &NormalizeStats, columns: &ColumnMap) -> Self {
        Self {
            records,
            dropped_missing_entity: normalize.dropped_missing_entity,
            dropped_bad_period: normalize.dropped_bad_period,
            unresolved_columns: columns.unresolved().iter().map(CanonicalField::to_string).collect(),
            ..Self::default()
        }
    }

    /// Rows that did not make it into the index.
    pub fn rows_dropped(&self) -> usize {
        self.dropped_missing_entity + self.dropped_bad_period + self.duplicates_dropped
    }
}

/// One immutable, fully built dataset.
///
/// Every load produces a new snapshot; nothing in it changes afterwards.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    /// Load sequence number assigned by a [`crate::DatasetHandle`]; 0 for
    /// snapshots built directly.
    pub sequence: u64,
    pub source: SourceMetadata,
    pub report: LoadReport,
    pub index: IndexedDataset,
}

/// One metric of an entity report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub metric: Metric,
    /// Value as it appeared in the source.
    pub raw: Option<f64>,
    /// Value to display, possibly forward-filled.
    pub value: Option<f64>,
    pub imputed: bool,
    /// Change from the previous period.
    pub trend: Trend,
}

/// Everything the presentation layer needs for one (entity, period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityReport {
    pub entity: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub period: i32,
    pub metrics: Vec<MetricReading>,
    /// Weakest category and its score.
    pub worst_category: Option<Category>,
    pub worst_score: Option<f64>,
    pub recommendation_severity: Option<SeverityTier>,
    pub recommendations: Vec<String>,
    pub action_severity: Option<SeverityTier>,
    pub actions: Vec<String>,
}

impl EntityReport {
    pub fn reading(&self, metric: Metric) -> Option<&MetricReading> {
        self.metrics.iter().find(|r| r.metric == metric)
    }
}

/// The main Gapscope pipeline.
///
/// Holds the configured parser, normalizer and imputer plus the two content
/// banks. Building a snapshot and every query on it are synchronous.
#[derive(Debug, Clone)]
pub struct Gapscope {
    config: GapscopeConfig,
    parser: Parser,
    normalizer: Normalizer,
    imputer: Imputer,
    recommendations: Arc<ContentBank>,
    actions: Arc<ContentBank>,
}

impl Default for Gapscope {
    fn default() -> Self {
        Self::new()
    }
}

impl Gapscope {
    /// Create a pipeline with default configuration and the built-in banks.
    pub fn new() -> Self {
        Self::with_config(GapscopeConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: GapscopeConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser.clone()),
            normalizer: Normalizer::with_config(config.normalizer.clone()),
            imputer: Imputer::with_config(config.imputation),
            recommendations: Arc::new(builtin::recommendations().clone()),
            actions: Arc::new(builtin::actions().clone()),
            config,
        }
    }

    /// Replace the content banks.
    pub fn with_banks(mut self, recommendations: ContentBank, actions: ContentBank) -> Self {
        self.recommendations = Arc::new(recommendations);
        self.actions = Arc::new(actions);
        self
    }

    pub fn config(&self) -> &GapscopeConfig {
        &self.config
    }

    pub fn recommendation_bank(&self) -> &ContentBank {
        &self.recommendations
    }

    pub fn action_bank(&self) -> &ContentBank {
        &self.actions
    }

    /// Read a file and build a snapshot from it.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<DatasetSnapshot> {
        let path = path.as_ref();
        let (table, source) = self.parser.parse_file(path)?;
        self.finish(table, source)
    }

    /// Run parse, normalize, dedupe, impute and index over already-read text.
    ///
    /// Fails only on a duplicate key under the `reject` policy. Text with no
    /// usable rows gives an empty snapshot.
    pub fn build_snapshot(
        &self,
        label: impl Into<String>,
        path: Option<PathBuf>,
        text: &str,
    ) -> Result<DatasetSnapshot> {
        let (table, source) = self.parser.parse_source(label, path, text);
        self.finish(table, source)
    }

    fn finish(&self, table: DataTable, source: SourceMetadata) -> Result<DatasetSnapshot> {
        let columns = ColumnMap::resolve(&table.headers);
        let (rows, normalize) = self.normalizer.normalize(&table);
        let mut report = LoadReport::new(table.row_count(), &normalize, &columns);

        let (rows, duplicates) = enforce_unique_keys(rows, self.config.duplicates)?;
        report.duplicates_dropped = duplicates;

        let (rows, imputed) = self.imputer.impute(rows);
        report.imputed = imputed;
        debug!(filled = imputed.total_filled(), "imputation complete");

        let index = IndexedDataset::build(rows)?;
        report.rows_indexed = index.row_count();
        report.entities = index.entity_count();

        info!(
            file = %source.file,
            rows = report.rows_indexed,
            entities = report.entities,
            "dataset built"
        );

        Ok(DatasetSnapshot {
            sequence: 0,
            source,
            report,
            index,
        })
    }

    /// Trend of `metric` for (entity, period) against the previous period.
    pub fn trend_of(&self, snapshot: &DatasetSnapshot, entity: &str, period: i32, metric: Metric) -> Trend {
        let current = snapshot.index.get(entity, period).and_then(|r| r.value(metric));
        let prior = snapshot
            .index
            .neighbor(entity, period, -1)
            .and_then(|r| r.value(metric));
        trend(current, prior, &self.config.trend_direction)
    }

    /// Finalized periods available for an entity.
    pub fn years(&self, snapshot: &DatasetSnapshot, entity: &str, order: PeriodOrder) -> Vec<i32> {
        snapshot
            .index
            .periods_for(entity, order, |p| self.config.is_finalized(p))
    }

    /// Draw recommendations for the entity's weakest category.
    pub fn recommend(&self, scores: &CategoryScores, rng: &mut Rng) -> Option<Selection> {
        select_for_scores(&self.recommendations, &self.config.recommendations, scores, rng)
    }

    /// Draw suggested actions for the entity's weakest category.
    pub fn suggest_actions(&self, scores: &CategoryScores, rng: &mut Rng) -> Option<Selection> {
        select_for_scores(&self.actions, &self.config.actions, scores, rng)
    }

    /// Build the full report for (entity, period).
    ///
    /// `None` when the dataset has no such row. Calling again with the same
    /// `rng` draws a fresh set of texts.
    pub fn report(
        &self,
        snapshot: &DatasetSnapshot,
        catalog: Option<&CountryCatalog>,
        entity: &str,
        period: i32,
        rng: &mut Rng,
    ) -> Option<EntityReport> {
        let row = snapshot.index.get(entity, period)?;

        let metrics = Metric::ALL
            .into_iter()
            .map(|metric| {
                let MetricCell { raw, value, imputed } = *row.cell(metric);
                MetricReading {
                    metric,
                    raw,
                    value,
                    imputed,
                    trend: self.trend_of(snapshot, entity, period, metric),
                }
            })
            .collect();

        let scores = CategoryScores::from_row(row);
        let recommendations = self.recommend(&scores, rng);
        let actions = self.suggest_actions(&scores, rng);
        let meta = catalog.and_then(|c| c.get(entity));

        Some(EntityReport {
            entity: row.entity.clone(),
            name: meta.map(|m| m.name.clone()).unwrap_or_else(|| row.entity.clone()),
            region: meta.map(|m| m.region.clone()),
            period,
            metrics,
            worst_category: recommendations.as_ref().map(|s| s.category),
            worst_score: recommendations.as_ref().map(|s| s.score),
            recommendation_severity: recommendations.as_ref().map(|s| s.severity),
            recommendations: texts(recommendations.as_ref()),
            action_severity: actions.as_ref().map(|s| s.severity),
            actions: texts(actions.as_ref()),
        })
    }
}

fn texts(selection: Option<&Selection>) -> Vec<String> {
    selection
        .map(|s| s.texts().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}
