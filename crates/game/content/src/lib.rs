//! Data-driven quiz content and loaders.
//!
//! This crate reads the files a quiz install ships with:
//! - Country catalog (JSON array of flag records)
//! - Quiz configuration (TOML)
//!
//! Content is handed to `quiz-core` as a [`CountryCatalog`](quiz_core::CountryCatalog)
//! and [`QuizConfig`](quiz_core::QuizConfig); nothing here mutates session state.

pub mod loaders;

pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, CountryRecord, LoadError, LoadResult};
