//! Metric and category enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the numeric columns carried by every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Economic sub-score.
    Econ,
    /// Social sub-score.
    Social,
    /// Physical (health and safety) sub-score.
    Physical,
    /// Aggregate score.
    Total,
}

impl Metric {
    /// All metrics in column order.
    pub const ALL: [Metric; 4] = [Metric::Econ, Metric::Social, Metric::Physical, Metric::Total];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Econ => "Economic",
            Metric::Social => "Social",
            Metric::Physical => "Physical",
            Metric::Total => "Total",
        }
    }

    /// The category this metric scores, if it is a category sub-score.
    pub fn category(&self) -> Option<Category> {
        match self {
            Metric::Econ => Some(Category::Economic),
            Metric::Social => Some(Category::Social),
            Metric::Physical => Some(Category::Physical),
            Metric::Total => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A content category, one per sub-score.
///
/// Declaration order is the tie-break precedence when two categories share
/// the lowest score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Economic,
    Social,
    Physical,
}

impl Category {
    /// Categories in tie-break precedence order.
    pub const PRECEDENCE: [Category; 3] = [Category::Economic, Category::Social, Category::Physical];

    /// The metric column holding this category's score.
    pub fn metric(&self) -> Metric {
        match self {
            Category::Economic => Metric::Econ,
            Category::Social => Metric::Social,
            Category::Physical => Metric::Physical,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Economic => "economic",
            Category::Social => "social",
            Category::Physical => "physical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_metric_round_trip() {
        for category in Category::PRECEDENCE {
            assert_eq!(category.metric().category(), Some(category));
        }
        assert_eq!(Metric::Total.category(), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Metric::Econ).unwrap(), "\"econ\"");
        assert_eq!(serde_json::to_string(&Category::Physical).unwrap(), "\"physical\"");
    }
}
