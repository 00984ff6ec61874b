//! Content bank: pre-authored text entries tagged by category and severity.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::SeverityTier;
use crate::error::{GapscopeError, Result};
use crate::schema::Category;

/// Theme of a suggested personal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTag {
    Work,
    Daily,
    Community,
    Money,
    Policy,
    MentalHealth,
    Relationships,
}

impl ActionTag {
    pub fn label(&self) -> &'static str {
        match self {
            ActionTag::Work => "work",
            ActionTag::Daily => "daily",
            ActionTag::Community => "community",
            ActionTag::Money => "money",
            ActionTag::Policy => "policy",
            ActionTag::MentalHealth => "mental_health",
            ActionTag::Relationships => "relationships",
        }
    }
}

/// One selectable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Unique within its bank.
    pub id: String,
    /// Category the entry targets. `None` applies to every category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub severity: SeverityTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ActionTag>,
    pub text: String,
}

impl ContentEntry {
    /// True when this entry is eligible for (category, severity).
    pub fn matches(&self, category: Category, severity: SeverityTier) -> bool {
        self.severity == severity && self.category.is_none_or(|c| c == category)
    }
}

/// Immutable collection of entries with unique ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBank {
    pub(super) name: String,
    pub(super) entries: Vec<ContentEntry>,
}

impl ContentBank {
    /// Build a bank, rejecting duplicate ids and blank texts.
    pub fn new(name: impl Into<String>, entries: Vec<ContentEntry>) -> Result<Self> {
        let name = name.into();
        let mut ids = HashSet::new();
        for entry in &entries {
            if !ids.insert(entry.id.as_str()) {
                return Err(GapscopeError::Config(format!(
                    "content bank '{}' has duplicate id '{}'",
                    name, entry.id
                )));
            }
            if entry.text.trim().is_empty() {
                return Err(GapscopeError::Config(format!(
                    "content bank '{}' entry '{}' has no text",
                    name, entry.id
                )));
            }
        }
        Ok(Self { name, entries })
    }

    /// Parse a bank from a JSON array of entries.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let entries: Vec<ContentEntry> = serde_json::from_str(json)?;
        Self::new(name, entries)
    }

    /// Load a bank from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GapscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json(name, &json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries eligible for (category, severity), in bank order.
    pub fn pool(&self, category: Category, severity: SeverityTier) -> Vec<&ContentEntry> {
        self.entries
            .iter()
            .filter(|e| e.matches(category, severity))
            .collect()
    }
}
