//! Deterministic round and session rules for the flag quiz.
//!
//! `quiz-core` defines the canonical rules (catalog sampling, round drawing,
//! the session state machine, leaderboard merging) as pure APIs with no I/O.
//! All session mutation flows through [`engine::SessionEngine`]; randomness is
//! injected through [`rng::RandomSource`] so every draw can be replayed.
pub mod catalog;
pub mod config;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod event;
pub mod leaderboard;
pub mod rng;
pub mod round;
pub mod state;

pub use catalog::{CatalogError, CountryCatalog, CountryEntry, EntryId};
pub use config::{QuizConfig, TimeoutPolicy};
pub use difficulty::DifficultyLevel;
pub use engine::{
    ExecuteError, IgnoreReason, SessionEngine, TransitionOutcome, TransitionPhase,
    TransitionPhaseError,
};
pub use error::{ErrorSeverity, QuizError};
pub use event::{SessionError, SessionEvent};
pub use leaderboard::{Leaderboard, LeaderboardError, RecordChange, ScoreRecord};
pub use rng::{PcgRng, RandomSource};
pub use round::{InsufficientDataError, Round, RoundEngine, UsedEntries};
pub use state::{AnswerVerdict, RoundResolution, SessionPhase, SessionRules, SessionState};
