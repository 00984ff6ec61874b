//! Two-level lookup: entity -> period -> row.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GapscopeError, Result};
use crate::schema::Row;

/// What to do when two rows share an (entity, period) key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the load.
    #[default]
    Reject,
    /// Keep the first row in input order and drop the rest.
    KeepFirst,
}

/// Sort direction for period listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodOrder {
    #[default]
    Ascending,
    Descending,
}

/// Apply `policy` to rows that share an (entity, period) key.
///
/// Returns the surviving rows in input order and the number dropped.
pub fn enforce_unique_keys(rows: Vec<Row>, policy: DuplicatePolicy) -> Result<(Vec<Row>, usize)> {
    let mut seen: HashSet<(String, i32)> = HashSet::with_capacity(rows.len());
    let mut kept = Vec::with_capacity(rows.len());
    let mut dropped = 0;

    for row in rows {
        if seen.insert((row.entity.clone(), row.period)) {
            kept.push(row);
            continue;
        }
        match policy {
            DuplicatePolicy::Reject => {
                return Err(GapscopeError::DuplicateKey {
                    entity: row.entity,
                    period: row.period,
                });
            }
            DuplicatePolicy::KeepFirst => {
                warn!(entity = %row.entity, period = row.period, "dropping duplicate row");
                dropped += 1;
            }
        }
    }

    Ok((kept, dropped))
}

/// Read-only dataset indexed by entity and period.
///
/// Built once from a normalized, imputed row set and never updated in place.
#[derive(Debug, Clone, Default)]
pub struct IndexedDataset {
    entities: HashMap<String, HashMap<i32, Row>>,
    row_count: usize,
}

impl IndexedDataset {
    /// Build the index. Input order is irrelevant; a repeated key is an error.
    pub fn build(rows: impl IntoIterator<Item = Row>) -> Result<Self> {
        let mut entities: HashMap<String, HashMap<i32, Row>> = HashMap::new();
        let mut row_count = 0;

        for row in rows {
            let periods = entities.entry(row.entity.clone()).or_default();
            if periods.contains_key(&row.period) {
                return Err(GapscopeError::DuplicateKey {
                    entity: row.entity,
                    period: row.period,
                });
            }
            periods.insert(row.period, row);
            row_count += 1;
        }

        Ok(Self { entities, row_count })
    }

    /// Row for (entity, period), if present.
    pub fn get(&self, entity: &str, period: i32) -> Option<&Row> {
        self.entities.get(entity)?.get(&period)
    }

    /// Row `offset` periods away from `period` (e.g. -1 for the year before).
    pub fn neighbor(&self, entity: &str, period: i32, offset: i32) -> Option<&Row> {
        self.get(entity, period.checked_add(offset)?)
    }

    /// Stored key for a user-typed code: exact match after trimming, else the
    /// first key equal ignoring ASCII case.
    pub fn resolve_entity(&self, code: &str) -> Option<&str> {
        let code = code.trim();
        if let Some((key, _)) = self.entities.get_key_value(code) {
            return Some(key);
        }
        self.entities
            .keys()
            .filter(|k| k.eq_ignore_ascii_case(code))
            .min()
            .map(String::as_str)
    }

    pub fn contains_entity(&self, entity: &str) -> bool {
        self.entities.contains_key(entity)
    }

    /// Distinct periods for an entity that pass `include`, sorted.
    ///
    /// `include` is how callers leave out periods that are not yet final
    /// (forecast years beyond the reliable horizon).
    pub fn periods_for(&self, entity: &str, order: PeriodOrder, include: impl Fn(i32) -> bool) -> Vec<i32> {
        let Some(periods) = self.entities.get(entity) else {
            return Vec::new();
        };
        let mut out: Vec<i32> = periods.keys().copied().filter(|p| include(*p)).collect();
        out.sort_unstable();
        if order == PeriodOrder::Descending {
            out.reverse();
        }
        out
    }

    /// All entity codes, sorted.
    pub fn entities(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.entities.keys().map(|s| s.as_str()).collect();
        out.sort_unstable();
        out
    }

    /// Every distinct period across all entities, ascending.
    pub fn all_periods(&self) -> Vec<i32> {
        let mut out: Vec<i32> = self
            .entities
            .values()
            .flat_map(|p| p.keys().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        out.sort_unstable();
        out
    }

    /// Iterate all rows in no particular order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.entities.values().flat_map(|p| p.values())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}
