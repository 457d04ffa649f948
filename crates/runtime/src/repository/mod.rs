//! Repository layer for persisted leaderboard data.
//!
//! Scores are the only data that outlives a session. They live in a single
//! named slot holding every [`ScoreRecord`](quiz_core::ScoreRecord); merge
//! rules stay in `quiz-core` and repositories only move records in and out.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileLeaderboardRepository;
pub use memory::InMemoryLeaderboardRepository;
pub use traits::LeaderboardRepository;
