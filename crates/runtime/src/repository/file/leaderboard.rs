//! File-based LeaderboardRepository implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use quiz_core::ScoreRecord;
use tempfile::NamedTempFile;

use crate::repository::{LeaderboardRepository, RepositoryError, Result};

/// File-based implementation of LeaderboardRepository.
///
/// # File Format
///
/// The slot is stored as `PlayerScores.json`, a JSON array of
/// `{ "playerName": ..., "score": ... }` objects. Each write goes to its own
/// uniquely named temporary file in the same directory and is renamed into
/// place, so concurrent writers never share a temp file.
#[derive(Debug, Clone)]
pub struct FileLeaderboardRepository {
    dir: PathBuf,
    path: PathBuf,
}

impl FileLeaderboardRepository {
    /// Name of the slot holding every score record.
    pub const SLOT: &'static str = "PlayerScores";

    /// Create a repository storing its slot under `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            dir: base_dir.to_path_buf(),
            path: base_dir.join(format!("{}.json", Self::SLOT)),
        })
    }

    /// Repository under the platform data directory.
    pub fn in_default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "flag-quiz").ok_or(RepositoryError::NoDataDir)?;
        Self::new(dirs.data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardRepository for FileLeaderboardRepository {
    fn load_records(&self) -> Result<Vec<ScoreRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path)?;
        let records: Vec<ScoreRecord> = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            "Loaded {} score records from {}",
            records.len(),
            self.path.display()
        );

        Ok(records)
    }

    fn save_records(&self, records: &[ScoreRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;

        // Atomic rename
        temp.persist(&self.path).map_err(|err| err.error)?;

        tracing::debug!(
            "Saved {} score records to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLeaderboardRepository::new(dir.path()).unwrap();
        assert!(repo.load_records().unwrap().is_empty());
    }

    #[test]
    fn records_survive_a_new_repository() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLeaderboardRepository::new(dir.path()).unwrap();
        repo.save_records(&[ScoreRecord::new("Ann", 50), ScoreRecord::new("Bob", 20)])
            .unwrap();

        let reopened = FileLeaderboardRepository::new(dir.path()).unwrap();
        assert_eq!(
            reopened.load_records().unwrap(),
            vec![ScoreRecord::new("Ann", 50), ScoreRecord::new("Bob", 20)]
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(leftovers, ["PlayerScores.json"]);
    }

    #[test]
    fn slot_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLeaderboardRepository::new(dir.path()).unwrap();
        repo.save_records(&[ScoreRecord::new("Ann", 3)]).unwrap();

        let raw = fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"playerName\""));
        assert!(repo.path().ends_with("PlayerScores.json"));
    }

    #[test]
    fn corrupt_slot_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLeaderboardRepository::new(dir.path()).unwrap();
        fs::write(repo.path(), b"not json").unwrap();
        assert!(matches!(repo.load_records(), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn concurrent_saves_leave_a_whole_slot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLeaderboardRepository::new(dir.path()).unwrap();

        std::thread::scope(|scope| {
            for i in 0..8u32 {
                let repo = repo.clone();
                scope.spawn(move || {
                    let records: Vec<_> = (0..=i)
                        .map(|n| ScoreRecord::new(format!("P{n}"), n))
                        .collect();
                    repo.save_records(&records).unwrap();
                });
            }
        });

        let records = repo.load_records().unwrap();
        assert!(!records.is_empty());
        assert_eq!(records.len(), records.last().unwrap().score as usize + 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
