//! Country catalog: read-only metadata used to label and group entities.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GapscopeError, Result};

/// Region assigned to entries that do not name one.
pub const DEFAULT_REGION: &str = "Other";

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// One country record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryMeta {
    /// Stable three-letter code; matches the entity codes in the scores file.
    pub iso3: String,
    /// Short two-letter code.
    pub iso2: String,
    /// Display name.
    pub name: String,
    #[serde(default = "default_region")]
    pub region: String,
}

/// Lookup over a list of [`CountryMeta`], sorted by name.
#[derive(Debug, Clone, Default)]
pub struct CountryCatalog {
    countries: Vec<CountryMeta>,
    by_code: HashMap<String, usize>,
}

impl CountryCatalog {
    /// Build a catalog. Codes are matched case-insensitively.
    pub fn new(mut countries: Vec<CountryMeta>) -> Self {
        for country in &mut countries {
            if country.region.trim().is_empty() {
                country.region = default_region();
            }
        }
        countries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut by_code = HashMap::with_capacity(countries.len() * 2);
        for (idx, country) in countries.iter().enumerate() {
            by_code.entry(country.iso3.to_ascii_uppercase()).or_insert(idx);
            by_code.entry(country.iso2.to_ascii_uppercase()).or_insert(idx);
        }

        Self { countries, by_code }
    }

    /// Parse a catalog from a JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        let countries: Vec<CountryMeta> = serde_json::from_str(json)?;
        Ok(Self::new(countries))
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GapscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Find a country by ISO3 or ISO2 code.
    pub fn get(&self, code: &str) -> Option<&CountryMeta> {
        let idx = self.by_code.get(&code.trim().to_ascii_uppercase())?;
        self.countries.get(*idx)
    }

    /// Display name for a code, or the code itself when unknown.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map(|c| c.name.as_str()).unwrap_or(code)
    }

    /// Countries grouped by region; regions in order of first appearance
    /// (by country name), countries sorted by name.
    pub fn by_region(&self) -> IndexMap<&str, Vec<&CountryMeta>> {
        let mut groups: IndexMap<&str, Vec<&CountryMeta>> = IndexMap::new();
        for country in &self.countries {
            groups.entry(country.region.as_str()).or_default().push(country);
        }
        groups
    }

    pub fn countries(&self) -> &[CountryMeta] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"iso3": "SWE", "iso2": "SE", "name": "Sweden", "region": "Europe"},
        {"iso3": "KEN", "iso2": "KE", "name": "Kenya", "region": "Africa"},
        {"iso3": "FRA", "iso2": "FR", "name": "France", "region": "Europe"},
        {"iso3": "ATA", "iso2": "AQ", "name": "Antarctica", "region": ""},
        {"iso3": "XKX", "iso2": "XK", "name": "Kosovo"}
    ]"#;

    #[test]
    fn test_lookup_by_either_code() {
        let catalog = CountryCatalog::from_json(SAMPLE).unwrap();

        assert_eq!(catalog.get("FRA").map(|c| c.name.as_str()), Some("France"));
        assert_eq!(catalog.get("fr").map(|c| c.iso3.as_str()), Some("FRA"));
        assert!(catalog.get("ZZZ").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        let catalog = CountryCatalog::from_json(SAMPLE).unwrap();

        assert_eq!(catalog.display_name("KEN"), "Kenya");
        assert_eq!(catalog.display_name("ZZZ"), "ZZZ");
    }

    #[test]
    fn test_missing_region_defaults() {
        let catalog = CountryCatalog::from_json(SAMPLE).unwrap();

        assert_eq!(catalog.get("XKX").map(|c| c.region.as_str()), Some(DEFAULT_REGION));
        assert_eq!(catalog.get("ATA").map(|c| c.region.as_str()), Some(DEFAULT_REGION));
    }

    #[test]
    fn test_by_region() {
        let catalog = CountryCatalog::from_json(SAMPLE).unwrap();
        let groups = catalog.by_region();

        let regions: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(regions, vec!["Other", "Europe", "Africa"]);
        let europe: Vec<&str> = groups["Europe"].iter().map(|c| c.name.as_str()).collect();
        assert_eq!(europe, vec!["France", "Sweden"]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CountryCatalog::from_json("{not json"),
            Err(GapscopeError::Json(_))
        ));
    }
}
