//! Runtime orchestration for the flag quiz.
//!
//! This crate wires the pure session rules of `quiz-core` to persistence,
//! timers and events. Hosts with their own event loop embed
//! [`SessionDriver`]; async hosts build a [`Runtime`] and play through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`driver`] is the synchronous host API over one session
//! - [`leaderboard`] and [`repository`] persist scores
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod driver;
pub mod leaderboard;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{QuizEvent, Result, RuntimeError, RuntimeHandle};
pub use driver::SessionDriver;
pub use leaderboard::LeaderboardStore;
pub use repository::{
    FileLeaderboardRepository, InMemoryLeaderboardRepository, LeaderboardRepository,
    RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
