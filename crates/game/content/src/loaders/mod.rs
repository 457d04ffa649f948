//! Content loaders for reading quiz data from files.

pub mod catalog;
pub mod config;
pub mod factory;

pub use catalog::{CatalogLoader, CountryRecord};
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::{Path, PathBuf};

/// Failure to produce usable content from a data source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse country catalog JSON: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("failed to parse config TOML: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    #[error("country catalog is empty")]
    EmptyCatalog,

    #[error("catalog record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: &'static str },
}

/// Common result type for loaders.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
