//! Quiz configuration loader.

use std::path::Path;

use quiz_core::QuizConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for quiz configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> LoadResult<QuizConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<QuizConfig> {
        let mut config: QuizConfig = toml::from_str(content)?;
        config.round_duration_secs = config.round_duration_secs.max(1);
        Ok(config)
    }
}
