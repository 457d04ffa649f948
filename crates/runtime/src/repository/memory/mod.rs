//! In-memory repository implementations for testing and development.

mod leaderboard;

pub use leaderboard::InMemoryLeaderboardRepository;
