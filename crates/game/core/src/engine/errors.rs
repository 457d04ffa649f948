//! Error types for the event pipeline.

use crate::error::{ErrorSeverity, QuizError};
use crate::event::SessionError;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while driving a session through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("session start failed: {0}")]
    Start(SessionError),

    #[error("submit answer failed: {0}")]
    SubmitAnswer(TransitionPhaseError<SessionError>),

    #[error("timer tick failed: {0}")]
    TimerTick(TransitionPhaseError<SessionError>),

    #[error("advance round failed: {0}")]
    AdvanceRound(TransitionPhaseError<SessionError>),
}

impl ExecuteError {
    /// The session-level cause, regardless of which event raised it.
    pub fn session_error(&self) -> &SessionError {
        match self {
            ExecuteError::Start(error) => error,
            ExecuteError::SubmitAnswer(inner)
            | ExecuteError::TimerTick(inner)
            | ExecuteError::AdvanceRound(inner) => &inner.error,
        }
    }
}

impl QuizError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.session_error().severity()
    }

    fn error_code(&self) -> &'static str {
        self.session_error().error_code()
    }
}
