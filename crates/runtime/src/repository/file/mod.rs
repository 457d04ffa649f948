//! File-based repository implementations.

mod leaderboard;

pub use leaderboard::FileLeaderboardRepository;
