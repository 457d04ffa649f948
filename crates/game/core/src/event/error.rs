use crate::catalog::EntryId;
use crate::error::{ErrorSeverity, QuizError};
use crate::round::InsufficientDataError;

/// Errors raised while validating or applying a session event.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no round is active")]
    NoActiveRound,

    #[error("entry {entry} is not an option of round {round}")]
    UnknownOption { entry: EntryId, round: u32 },

    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),

    #[error("session invariant violated: {0}")]
    InvariantViolated(&'static str),
}

impl QuizError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownOption { .. } => ErrorSeverity::Validation,
            Self::InsufficientData(_) => ErrorSeverity::Recoverable,
            Self::NoActiveRound => ErrorSeverity::Internal,
            Self::InvariantViolated(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveRound => "SESSION_NO_ACTIVE_ROUND",
            Self::UnknownOption { .. } => "SESSION_UNKNOWN_OPTION",
            Self::InsufficientData(_) => "SESSION_INSUFFICIENT_DATA",
            Self::InvariantViolated(_) => "SESSION_INVARIANT_VIOLATED",
        }
    }
}
