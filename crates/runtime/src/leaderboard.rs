//! Leaderboard persistence over an injected repository.
//!
//! [`LeaderboardStore`] applies the merge rules of [`quiz_core::Leaderboard`]
//! to whatever the repository holds. Plain reads never fail: an unreadable
//! slot is treated as empty so a broken save file never blocks play. Writes
//! only start from an empty board when the slot is malformed.

use quiz_core::{Leaderboard, RecordChange, ScoreRecord};
use tracing::{debug, warn};

use crate::api::Result;
use crate::repository::{LeaderboardRepository, RepositoryError};

pub struct LeaderboardStore<R> {
    repository: R,
}

impl<R: LeaderboardRepository> LeaderboardStore<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Current leaderboard. Read or decode failures yield an empty board.
    pub fn load(&self) -> Leaderboard {
        match self.repository.load_records() {
            Ok(records) => Leaderboard::from_records(records),
            Err(error) => {
                warn!(
                    target: "runtime::leaderboard",
                    error = %error,
                    "Leaderboard unreadable, starting empty"
                );
                Leaderboard::new()
            }
        }
    }

    /// Board to merge into before a write.
    ///
    /// A malformed slot is replaced; any other read failure aborts the write so
    /// stored records are never overwritten with a partial board.
    fn load_for_write(&self) -> Result<Leaderboard> {
        match self.repository.load_records() {
            Ok(records) => Ok(Leaderboard::from_records(records)),
            Err(RepositoryError::Json(error)) => {
                warn!(
                    target: "runtime::leaderboard",
                    error = %error,
                    "Leaderboard malformed, rewriting from empty"
                );
                Ok(Leaderboard::new())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Merge a finished session's score into the stored leaderboard.
    ///
    /// The slot is re-read right before merging so records written by another
    /// store since the last read are kept. Nothing is written when the score
    /// does not beat the player's stored best.
    pub fn record_score(&self, record: &ScoreRecord) -> Result<RecordChange> {
        let mut board = self.load_for_write()?;
        let change = board.record_score(&record.player_name, record.score)?;

        if change.is_modified() {
            self.repository.save_records(board.records())?;
        }

        debug!(
            target: "runtime::leaderboard",
            player = %record.player_name,
            score = record.score,
            change = ?change,
            "Score recorded"
        );
        Ok(change)
    }

    /// Up to `n` records, highest score first.
    pub fn top_n(&self, n: usize) -> Vec<ScoreRecord> {
        self.load().top_n(n)
    }

    /// Delete the record held by `record`'s player. Returns whether one existed.
    pub fn delete(&self, record: &ScoreRecord) -> Result<bool> {
        let mut board = self.load_for_write()?;
        let removed = board.remove(&record.player_name);
        if removed {
            self.repository.save_records(board.records())?;
        }
        Ok(removed)
    }

    /// Remove every record.
    pub fn clear(&self) -> Result<()> {
        self.repository.save_records(&[])?;
        debug!(target: "runtime::leaderboard", "Leaderboard cleared");
        Ok(())
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}
