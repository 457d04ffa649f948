//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the session engine, the leaderboard repository and
//! worker coordination so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use quiz_core::{ErrorSeverity, ExecuteError, LeaderboardError, QuizError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no session has been started")]
    NoSession,

    #[error(transparent)]
    Session(#[from] ExecuteError),

    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires a country catalog before building")]
    MissingCatalog,

    #[error("failed to load quiz content")]
    Content(#[from] quiz_content::LoadError),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Severity of the underlying failure.
    ///
    /// Engine and leaderboard errors keep their own classification; a failed
    /// write only loses the score, so it stays recoverable.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Session(error) => error.severity(),
            Self::Leaderboard(error) => error.severity(),
            Self::NoSession => ErrorSeverity::Validation,
            Self::Repository(_) => ErrorSeverity::Recoverable,
            Self::MissingCatalog
            | Self::Content(_)
            | Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_) => ErrorSeverity::Fatal,
        }
    }
}
