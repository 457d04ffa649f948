//! Country catalog: the pool of flags a session draws from.

use std::collections::HashSet;
use std::fmt;

use crate::error::{ErrorSeverity, QuizError};
use crate::rng::RandomSource;

/// Stable identifier of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One flag/country eligible to appear in a round.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountryEntry {
    pub id: EntryId,
    /// Flag emoji shown as the question.
    pub glyph: String,
    /// Display name shown on the option buttons.
    pub name: String,
    /// Points awarded for a correct answer.
    pub score_value: u32,
}

impl CountryEntry {
    pub fn new(id: EntryId, glyph: impl Into<String>, name: impl Into<String>, score_value: u32) -> Self {
        Self {
            id,
            glyph: glyph.into(),
            name: name.into(),
            score_value,
        }
    }
}

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate catalog entry id {0}")]
    DuplicateId(EntryId),
}

impl QuizError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "CATALOG_DUPLICATE_ID",
        }
    }
}

/// Immutable list of candidate entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountryCatalog {
    entries: Vec<CountryEntry>,
}

impl CountryCatalog {
    /// Builds a catalog from entries that already carry ids.
    pub fn new(entries: Vec<CountryEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(Self { entries })
    }

    /// Builds a catalog from `(glyph, name, score_value)` records, assigning
    /// ids in iteration order starting at 0.
    pub fn from_records<I, G, N>(records: I) -> Self
    where
        I: IntoIterator<Item = (G, N, u32)>,
        G: Into<String>,
        N: Into<String>,
    {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(index, (glyph, name, score))| {
                CountryEntry::new(EntryId(index as u32), glyph, name, score)
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&CountryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&CountryEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Entries whose id is not in `excluding`, in catalog order.
    pub fn remaining<'a>(
        &'a self,
        excluding: &HashSet<EntryId>,
    ) -> impl Iterator<Item = &'a CountryEntry> {
        self.entries
            .iter()
            .filter(move |entry| !excluding.contains(&entry.id))
    }

    /// Draws up to `count` entries not in `excluding`, uniformly at random and
    /// without replacement.
    ///
    /// When fewer than `count` entries remain, all of them are returned (in
    /// random order); resetting the exclusions is the caller's job.
    pub fn sample<R: RandomSource>(
        &self,
        excluding: &HashSet<EntryId>,
        count: usize,
        rng: &mut R,
    ) -> Vec<CountryEntry> {
        let mut pool: Vec<&CountryEntry> = self.remaining(excluding).collect();
        let take = count.min(pool.len());

        // Partial Fisher-Yates: only the first `take` slots need settling.
        for i in 0..take {
            let j = i + rng.below(pool.len() - i);
            pool.swap(i, j);
        }

        pool.into_iter().take(take).cloned().collect()
    }
}
