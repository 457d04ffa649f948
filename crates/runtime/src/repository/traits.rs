//! Repository contract for the leaderboard slot.

use quiz_core::ScoreRecord;

use super::Result;

/// Storage for the raw leaderboard records.
///
/// Implementations load and replace the whole slot; they never merge. A slot
/// that was never written loads as an empty list.
pub trait LeaderboardRepository: Send + Sync {
    /// Read every stored record.
    fn load_records(&self) -> Result<Vec<ScoreRecord>>;

    /// Replace the stored records.
    fn save_records(&self, records: &[ScoreRecord]) -> Result<()>;
}

impl<T: LeaderboardRepository + ?Sized> LeaderboardRepository for Box<T> {
    fn load_records(&self) -> Result<Vec<ScoreRecord>> {
        (**self).load_records()
    }

    fn save_records(&self, records: &[ScoreRecord]) -> Result<()> {
        (**self).save_records(records)
    }
}

impl<T: LeaderboardRepository + ?Sized> LeaderboardRepository for std::sync::Arc<T> {
    fn load_records(&self) -> Result<Vec<ScoreRecord>> {
        (**self).load_records()
    }

    fn save_records(&self, records: &[ScoreRecord]) -> Result<()> {
        (**self).save_records(records)
    }
}
