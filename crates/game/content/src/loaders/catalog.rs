//! Country catalog loader.

use std::collections::HashSet;
use std::path::Path;

use quiz_core::CountryCatalog;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadError, LoadResult, read_file};

/// One record of the flag data file.
///
/// The shipped data uses the short keys `emoji`, `Country_y` and
/// `NormalizedScore`; `glyph`, `name` and `scoreValue` are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "emoji", alias = "glyph")]
    pub glyph: String,
    #[serde(rename = "Country_y", alias = "name")]
    pub name: String,
    #[serde(rename = "NormalizedScore", alias = "scoreValue")]
    pub score_value: u32,
}

/// Loader for the country catalog from JSON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the catalog from a JSON file.
    ///
    /// Fails when the file is unreadable, malformed, empty, or contains a
    /// record with a blank or repeated name.
    pub fn load(path: &Path) -> LoadResult<CountryCatalog> {
        let content = read_file(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded {} catalog entries from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> LoadResult<CountryCatalog> {
        let records: Vec<CountryRecord> = serde_json::from_str(content)?;
        Self::from_records(records)
    }

    /// Validates records and assigns entry ids in file order.
    pub fn from_records(records: Vec<CountryRecord>) -> LoadResult<CountryCatalog> {
        if records.is_empty() {
            return Err(LoadError::EmptyCatalog);
        }

        let mut names = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.glyph.trim().is_empty() {
                return Err(LoadError::InvalidRecord {
                    index,
                    reason: "missing flag glyph",
                });
            }
            if record.name.trim().is_empty() {
                return Err(LoadError::InvalidRecord {
                    index,
                    reason: "missing country name",
                });
            }
            if !names.insert(record.name.trim().to_lowercase()) {
                return Err(LoadError::InvalidRecord {
                    index,
                    reason: "duplicate country name",
                });
            }
        }

        Ok(CountryCatalog::from_records(
            records
                .into_iter()
                .map(|record| (record.glyph, record.name, record.score_value)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::EntryId;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"emoji": "🇫🇷", "Country_y": "France", "NormalizedScore": 10},
        {"emoji": "🇮🇹", "Country_y": "Italy", "NormalizedScore": 12},
        {"glyph": "🇩🇪", "name": "Germany", "scoreValue": 8}
    ]"#;

    #[test]
    fn parses_short_keys_and_aliases() {
        let catalog = CatalogLoader::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let germany = catalog.get(EntryId(2)).unwrap();
        assert_eq!(germany.glyph, "🇩🇪");
        assert_eq!(germany.name, "Germany");
        assert_eq!(germany.score_value, 8);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = CatalogLoader::from_json_str("[{\"emoji\": 3}").unwrap_err();
        assert!(matches!(err, LoadError::CatalogFormat(_)));
    }

    #[test]
    fn negative_scores_are_rejected() {
        let json = r#"[{"emoji": "🇫🇷", "Country_y": "France", "NormalizedScore": -1}]"#;
        assert!(CatalogLoader::from_json_str(json).is_err());
    }

    #[test]
    fn empty_catalog_is_a_load_error() {
        let err = CatalogLoader::from_json_str("[]").unwrap_err();
        assert!(matches!(err, LoadError::EmptyCatalog));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let json = r#"[
            {"emoji": "🇫🇷", "Country_y": "France", "NormalizedScore": 1},
            {"emoji": "🇫🇷", "Country_y": "france", "NormalizedScore": 2}
        ]"#;
        let err = CatalogLoader::from_json_str(json).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogLoader::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = CatalogLoader::load(file.path()).unwrap();
        assert_eq!(catalog.find_by_name("italy").map(|e| e.score_value), Some(12));
    }
}
