//! Pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::Direction;
use crate::content::SelectionConfig;
use crate::error::{GapscopeError, Result};
use crate::imputation::ImputationConfig;
use crate::index::DuplicatePolicy;
use crate::input::{NormalizerConfig, ParserConfig};

/// Every recognized option for a [`crate::Gapscope`] instance.
///
/// Thresholds and directions are validated while deserializing, so a bad
/// configuration file is rejected before any data is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapscopeConfig {
    pub parser: ParserConfig,
    pub normalizer: NormalizerConfig,
    pub imputation: ImputationConfig,
    pub duplicates: DuplicatePolicy,
    /// Comparator used for every trend indicator.
    pub trend_direction: Direction,
    pub recommendations: SelectionConfig,
    pub actions: SelectionConfig,
    /// Last period considered final. Later periods are hidden from
    /// "years available" queries but stay in the index.
    pub finalized_through: Option<i32>,
}

impl Default for GapscopeConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            normalizer: NormalizerConfig::default(),
            imputation: ImputationConfig::default(),
            duplicates: DuplicatePolicy::default(),
            trend_direction: Direction::default(),
            recommendations: SelectionConfig::recommendations(),
            actions: SelectionConfig::actions(),
            finalized_through: None,
        }
    }
}

impl GapscopeConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GapscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// True when `period` is within the finalized horizon.
    pub fn is_finalized(&self, period: i32) -> bool {
        self.finalized_through.is_none_or(|last| period <= last)
    }
}
