//! Header resolution: canonical fields and their accepted spellings.

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::metric::Metric;

// Whitespace, underscores and hyphens are insignificant in header names.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_\-]+").unwrap());

/// Normalize a header for comparison: lowercase, separators removed.
///
/// `"Econ Score"`, `"econ_score"` and `"EconScore"` all become `"econscore"`.
pub fn normalize_header(header: &str) -> String {
    SEPARATORS.replace_all(header.trim(), "").to_lowercase()
}

/// A field of the canonical row shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Entity,
    Period,
    Metric(Metric),
}

impl CanonicalField {
    /// Every canonical field, required ones first.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Entity,
        CanonicalField::Period,
        CanonicalField::Metric(Metric::Econ),
        CanonicalField::Metric(Metric::Social),
        CanonicalField::Metric(Metric::Physical),
        CanonicalField::Metric(Metric::Total),
    ];

    /// Accepted header spellings, most preferred first.
    pub fn spellings(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Entity => &["country code", "country", "iso3"],
            CanonicalField::Period => &["year", "period"],
            CanonicalField::Metric(Metric::Econ) => &["econ score", "economic score"],
            CanonicalField::Metric(Metric::Social) => &["social score"],
            CanonicalField::Metric(Metric::Physical) => &["physical score"],
            CanonicalField::Metric(Metric::Total) => &["total score"],
        }
    }

    /// Entity and period must resolve or no row can be indexed.
    pub fn is_required(&self) -> bool {
        matches!(self, CanonicalField::Entity | CanonicalField::Period)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spellings()[0])
    }
}

/// Column index resolved for each canonical field.
///
/// Fields whose header could not be found are absent from the map.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: IndexMap<CanonicalField, usize>,
}

impl ColumnMap {
    /// Resolve canonical fields against a header record.
    ///
    /// For each field the first accepted spelling present in the header wins,
    /// so `country code` is preferred over `country` when both exist. Extra
    /// header columns are ignored.
    pub fn resolve(headers: &[String]) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let mut columns = IndexMap::new();

        for field in CanonicalField::ALL {
            let found = field.spellings().iter().find_map(|spelling| {
                let wanted = normalize_header(spelling);
                normalized.iter().position(|h| *h == wanted)
            });
            if let Some(index) = found {
                columns.insert(field, index);
            }
        }

        Self { columns }
    }

    /// Column index for a field.
    pub fn index_of(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Required fields that did not resolve.
    pub fn missing_required(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| f.is_required() && !self.columns.contains_key(f))
            .collect()
    }

    /// Fields that did not resolve at all.
    pub fn unresolved(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| !self.columns.contains_key(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Econ Score"), "econscore");
        assert_eq!(normalize_header("econ_score"), "econscore");
        assert_eq!(normalize_header("EconScore"), "econscore");
        assert_eq!(normalize_header(" Country-Code "), "countrycode");
    }

    #[test]
    fn test_resolve_mixed_spellings() {
        let map = ColumnMap::resolve(&headers(&["Year", "Country Code", "EconScore", "social_score", "extra"]));

        assert_eq!(map.index_of(CanonicalField::Entity), Some(1));
        assert_eq!(map.index_of(CanonicalField::Period), Some(0));
        assert_eq!(map.index_of(CanonicalField::Metric(Metric::Econ)), Some(2));
        assert_eq!(map.index_of(CanonicalField::Metric(Metric::Social)), Some(3));
        assert_eq!(map.index_of(CanonicalField::Metric(Metric::Total)), None);
        assert!(map.missing_required().is_empty());
        assert_eq!(map.unresolved().len(), 2);
    }

    #[test]
    fn test_alternate_entity_header() {
        let map = ColumnMap::resolve(&headers(&["country", "year"]));
        assert_eq!(map.index_of(CanonicalField::Entity), Some(0));
    }

    #[test]
    fn test_country_code_preferred_over_country() {
        let map = ColumnMap::resolve(&headers(&["country", "country_code", "year"]));
        assert_eq!(map.index_of(CanonicalField::Entity), Some(1));
    }

    #[test]
    fn test_missing_required() {
        let map = ColumnMap::resolve(&headers(&["name", "econ_score"]));
        assert_eq!(
            map.missing_required(),
            vec![CanonicalField::Entity, CanonicalField::Period]
        );
    }
}
