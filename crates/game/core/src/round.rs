//! Round generation: one correct entry plus shuffled distractors.

use std::collections::HashSet;

use crate::catalog::{CountryCatalog, CountryEntry, EntryId};
use crate::error::{ErrorSeverity, QuizError};
use crate::rng::RandomSource;

/// One question instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// 1-based position of this round within its session.
    pub number: u32,
    correct: CountryEntry,
    options: Vec<CountryEntry>,
}

impl Round {
    pub fn correct_entry(&self) -> &CountryEntry {
        &self.correct
    }

    /// Options in display order. Contains the correct entry exactly once.
    pub fn options(&self) -> &[CountryEntry] {
        &self.options
    }

    pub fn option(&self, id: EntryId) -> Option<&CountryEntry> {
        self.options.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.option(id).is_some()
    }

    pub fn is_correct(&self, id: EntryId) -> bool {
        self.correct.id == id
    }
}

/// Entries already used as the correct answer in the current cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsedEntries(HashSet<EntryId>);

impl UsedEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_set(&self) -> &HashSet<EntryId> {
        &self.0
    }

    fn insert(&mut self, id: EntryId) {
        self.0.insert(id);
    }

    fn covers(&self, catalog: &CountryCatalog) -> bool {
        catalog.entries().iter().all(|entry| self.0.contains(&entry.id))
    }
}

/// The catalog cannot supply enough distinct entries for the requested
/// option count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("round needs {required} distinct entries but the catalog has {available}")]
pub struct InsufficientDataError {
    pub required: usize,
    pub available: usize,
}

impl QuizError for InsufficientDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "INSUFFICIENT_DATA"
    }
}

/// Stateless round generator.
pub struct RoundEngine;

impl RoundEngine {
    /// Smallest option count that still makes a question.
    pub const MIN_OPTIONS: usize = 2;

    /// Checks that `catalog` can serve rounds of `option_count` options.
    pub fn ensure_supported(
        catalog: &CountryCatalog,
        option_count: usize,
    ) -> Result<(), InsufficientDataError> {
        let required = option_count.max(Self::MIN_OPTIONS);
        if catalog.len() < required {
            return Err(InsufficientDataError {
                required,
                available: catalog.len(),
            });
        }
        Ok(())
    }

    /// Draws the next round and records its correct entry in `used`.
    ///
    /// The correct entry never repeats until every catalog entry has served
    /// once; at that point `used` is cleared and a new cycle begins.
    pub fn next_round<R: RandomSource>(
        catalog: &CountryCatalog,
        used: &mut UsedEntries,
        option_count: usize,
        number: u32,
        rng: &mut R,
    ) -> Result<Round, InsufficientDataError> {
        Self::ensure_supported(catalog, option_count)?;
        let option_count = option_count.max(Self::MIN_OPTIONS);

        let mut available: Vec<&CountryEntry> = catalog.remaining(used.as_set()).collect();
        if available.is_empty() {
            used.clear();
            available = catalog.entries().iter().collect();
        }

        let correct = available[rng.below(available.len())].clone();
        used.insert(correct.id);
        if used.covers(catalog) {
            used.clear();
        }

        let excluding: HashSet<EntryId> = [correct.id].into_iter().collect();
        let mut options = catalog.sample(&excluding, option_count - 1, rng);
        options.push(correct.clone());
        rng.shuffle(&mut options);

        Ok(Round {
            number,
            correct,
            options,
        })
    }
}
