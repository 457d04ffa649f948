//! Leaderboard merge rules: one record per player, holding their best score.

use crate::error::{ErrorSeverity, QuizError};

/// Persisted best score of one player.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScoreRecord {
    pub player_name: String,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(player_name: impl Into<String>, score: u32) -> Self {
        Self {
            player_name: player_name.into(),
            score,
        }
    }
}

/// Effect of [`Leaderboard::record_score`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordChange {
    /// First record for this player.
    Inserted,
    /// New personal best.
    Improved { previous: u32 },
    /// Score did not beat the stored best.
    Unchanged { best: u32 },
}

impl RecordChange {
    /// Whether the stored collection differs after the call.
    pub fn is_modified(&self) -> bool {
        !matches!(self, RecordChange::Unchanged { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LeaderboardError {
    #[error("player name must not be empty")]
    EmptyPlayerName,
}

impl QuizError for LeaderboardError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPlayerName => "LEADERBOARD_EMPTY_NAME",
        }
    }
}

/// In-memory leaderboard keyed by player name.
///
/// Records keep the order in which players first appeared; that order breaks
/// ties in [`top_n`](Self::top_n).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a leaderboard from raw persisted records.
    ///
    /// Duplicate players collapse into their first position with the maximum
    /// score; records with blank names are dropped.
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut board = Self::new();
        for record in records {
            // Blank names are the only rejection and those records are skipped.
            let _ = board.record_score(&record.player_name, record.score);
        }
        board
    }

    /// Inserts or raises a player's best score.
    ///
    /// An existing record changes only when `score` is strictly greater.
    pub fn record_score(
        &mut self,
        player_name: &str,
        score: u32,
    ) -> Result<RecordChange, LeaderboardError> {
        if player_name.trim().is_empty() {
            return Err(LeaderboardError::EmptyPlayerName);
        }

        match self
            .records
            .iter_mut()
            .find(|record| record.player_name == player_name)
        {
            Some(existing) if score > existing.score => {
                let previous = existing.score;
                existing.score = score;
                Ok(RecordChange::Improved { previous })
            }
            Some(existing) => Ok(RecordChange::Unchanged {
                best: existing.score,
            }),
            None => {
                self.records.push(ScoreRecord::new(player_name, score));
                Ok(RecordChange::Inserted)
            }
        }
    }

    /// Up to `n` records, highest score first; equal scores keep insertion order.
    pub fn top_n(&self, n: usize) -> Vec<ScoreRecord> {
        let mut sorted = self.records.clone();
        // `sort_by` is stable.
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(n);
        sorted
    }

    pub fn best_for(&self, player_name: &str) -> Option<u32> {
        self.records
            .iter()
            .find(|record| record.player_name == player_name)
            .map(|record| record.score)
    }

    /// Removes the record for `player_name`. Returns whether one existed.
    pub fn remove(&mut self, player_name: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.player_name != player_name);
        self.records.len() != before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_maximum_per_player() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record_score("Ann", 50), Ok(RecordChange::Inserted));
        assert_eq!(
            board.record_score("Ann", 30),
            Ok(RecordChange::Unchanged { best: 50 })
        );
        assert_eq!(board.best_for("Ann"), Some(50));

        assert_eq!(
            board.record_score("Ann", 70),
            Ok(RecordChange::Improved { previous: 50 })
        );
        assert_eq!(board.best_for("Ann"), Some(70));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn equal_score_is_not_an_improvement() {
        let mut board = Leaderboard::new();
        board.record_score("Ann", 50).unwrap();
        let change = board.record_score("Ann", 50).unwrap();
        assert!(!change.is_modified());
    }

    #[test]
    fn rejects_blank_names() {
        let mut board = Leaderboard::new();
        assert_eq!(
            board.record_score("  ", 10),
            Err(LeaderboardError::EmptyPlayerName)
        );
        assert!(board.is_empty());
    }

    #[test]
    fn top_n_returns_highest_descending_and_stable() {
        let mut board = Leaderboard::new();
        let scores = [12, 40, 7, 40, 33, 1, 25, 40, 18, 9];
        for (i, score) in scores.iter().enumerate() {
            board.record_score(&format!("p{i}"), *score).unwrap();
        }

        let top = board.top_n(5);
        let names: Vec<&str> = top.iter().map(|r| r.player_name.as_str()).collect();
        let values: Vec<u32> = top.iter().map(|r| r.score).collect();

        assert_eq!(values, vec![40, 40, 40, 33, 25]);
        assert_eq!(names, vec!["p1", "p3", "p7", "p4", "p6"]);
    }

    #[test]
    fn top_n_larger_than_board() {
        let mut board = Leaderboard::new();
        board.record_score("Ann", 5).unwrap();
        assert_eq!(board.top_n(10).len(), 1);
        assert!(board.top_n(0).is_empty());
    }

    #[test]
    fn from_records_merges_duplicates() {
        let board = Leaderboard::from_records([
            ScoreRecord::new("Ann", 20),
            ScoreRecord::new("Bob", 35),
            ScoreRecord::new("Ann", 40),
            ScoreRecord::new("", 99),
        ]);

        assert_eq!(
            board.records(),
            &[ScoreRecord::new("Ann", 40), ScoreRecord::new("Bob", 35)]
        );
    }

    #[test]
    fn remove_and_clear() {
        let mut board = Leaderboard::from_records([
            ScoreRecord::new("Ann", 20),
            ScoreRecord::new("Bob", 35),
        ]);
        assert!(board.remove("Ann"));
        assert!(!board.remove("Ann"));
        assert_eq!(board.len(), 1);

        board.clear();
        assert!(board.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn records_use_camel_case_field_names() {
        let json = serde_json::to_string(&ScoreRecord::new("Ann", 3)).unwrap();
        assert_eq!(json, r#"{"playerName":"Ann","score":3}"#);
    }
}
