//! In-memory LeaderboardRepository implementation for tests and local runs.

use std::sync::RwLock;

use quiz_core::ScoreRecord;

use crate::repository::{LeaderboardRepository, RepositoryError, Result};

/// In-memory implementation of LeaderboardRepository.
#[derive(Debug, Default)]
pub struct InMemoryLeaderboardRepository {
    records: RwLock<Vec<ScoreRecord>>,
}

impl InMemoryLeaderboardRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with records already in the slot.
    pub fn with_records(records: Vec<ScoreRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl LeaderboardRepository for InMemoryLeaderboardRepository {
    fn load_records(&self) -> Result<Vec<ScoreRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn save_records(&self, records: &[ScoreRecord]) -> Result<()> {
        let mut stored = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_replaces_the_slot() {
        let repo = InMemoryLeaderboardRepository::with_records(vec![ScoreRecord::new("Ann", 5)]);
        repo.save_records(&[ScoreRecord::new("Bob", 7)]).unwrap();
        assert_eq!(repo.load_records().unwrap(), vec![ScoreRecord::new("Bob", 7)]);
    }
}
