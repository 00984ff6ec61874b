//! Randomized, bounded content selection.

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bank::{ContentBank, ContentEntry};
use crate::analysis::{SeverityScale, SeverityTier};
use crate::schema::{Category, Metric, Row};

/// Per-category scores for one entity and period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub economic: Option<f64>,
    pub social: Option<f64>,
    pub physical: Option<f64>,
}

impl CategoryScores {
    pub fn new(economic: f64, social: f64, physical: f64) -> Self {
        Self {
            economic: Some(economic),
            social: Some(social),
            physical: Some(physical),
        }
    }

    /// Effective (possibly forward-filled) category scores of a row.
    pub fn from_row(row: &Row) -> Self {
        Self {
            economic: row.value(Metric::Econ),
            social: row.value(Metric::Social),
            physical: row.value(Metric::Physical),
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Economic => self.economic,
            Category::Social => self.social,
            Category::Physical => self.physical,
        }
    }
}

/// The category with the lowest score, and that score.
///
/// Ties go to the earlier category in [`Category::PRECEDENCE`]. Categories
/// without a score are skipped; `None` when no category has one.
pub fn worst_category(scores: &CategoryScores) -> Option<(Category, f64)> {
    let mut worst: Option<(Category, f64)> = None;
    for category in Category::PRECEDENCE {
        let Some(score) = scores.get(category) else {
            continue;
        };
        if worst.is_none_or(|(_, lowest)| score < lowest) {
            worst = Some((category, score));
        }
    }
    worst
}

/// Pick up to `k` distinct entries for (category, severity) in random order.
///
/// `k` is clamped to the pool size and an empty pool gives an empty result.
/// Every ordering of the pool is equally likely, so repeated calls with the
/// same RNG produce fresh draws.
pub fn select<'a>(
    bank: &'a ContentBank,
    category: Category,
    severity: SeverityTier,
    k: usize,
    rng: &mut Rng,
) -> Vec<&'a ContentEntry> {
    let mut pool = bank.pool(category, severity);
    rng.shuffle(&mut pool);
    pool.truncate(k);
    pool
}

/// Severity thresholds and subset size for one consumer of a bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub scale: SeverityScale,
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    2
}

impl SelectionConfig {
    /// Recommendations: 30/60 thresholds, two items.
    pub fn recommendations() -> Self {
        Self {
            scale: SeverityScale::recommendations(),
            k: default_k(),
        }
    }

    /// Suggested actions: 60/75 thresholds, two items.
    pub fn actions() -> Self {
        Self {
            scale: SeverityScale::actions(),
            k: default_k(),
        }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }
}

/// Outcome of selecting content for an entity's weakest category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub category: Category,
    pub score: f64,
    pub severity: SeverityTier,
    pub items: Vec<ContentEntry>,
}

impl Selection {
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|e| e.text.as_str()).collect()
    }
}

/// Find the worst category, grade it on `config.scale`, and draw
/// `config.k` entries for it.
///
/// `None` when no category has a score.
pub fn select_for_scores(
    bank: &ContentBank,
    config: &SelectionConfig,
    scores: &CategoryScores,
    rng: &mut Rng,
) -> Option<Selection> {
    let (category, score) = worst_category(scores)?;
    let severity = config.scale.classify(score);
    let items: Vec<ContentEntry> = select(bank, category, severity, config.k, rng)
        .into_iter()
        .cloned()
        .collect();

    debug!(
        bank = bank.name(),
        %category,
        score,
        %severity,
        selected = items.len(),
        "selected content"
    );

    Some(Selection {
        category,
        score,
        severity,
        items,
    })
}
