//! Events that drive a session and the transitions they run.
//!
//! Every event the host delivers (`SubmitAnswer`, `TimerTick`, `AdvanceRound`)
//! is a [`SessionTransition`]: validated against the state before mutation,
//! applied, then checked again afterwards. [`SessionEngine`](crate::engine::SessionEngine)
//! drives the three phases.

pub(crate) mod advance;
mod answer;
mod error;
mod timer;

pub use advance::AdvanceRound;
pub use answer::SubmitAnswer;
pub use error::SessionError;
pub use timer::{TickResult, TimerTick};

use crate::catalog::{CountryCatalog, EntryId};
use crate::config::QuizConfig;
use crate::rng::RandomSource;
use crate::state::{AnswerVerdict, RoundResolution, SessionPhase, SessionState};

/// Read-only facts every transition may consult.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEnv<'a> {
    pub catalog: &'a CountryCatalog,
    pub config: &'a QuizConfig,
}

impl<'a> TransitionEnv<'a> {
    pub fn new(catalog: &'a CountryCatalog, config: &'a QuizConfig) -> Self {
        Self { catalog, config }
    }
}

/// Defines how an event mutates session state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions around the mutation. Hooks receive read-only access to
/// the environment and must stay side-effect free.
pub trait SessionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &SessionState, _env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the event. Implementations may assume `pre_validate` passed.
    fn apply<R: RandomSource>(
        &self,
        state: &mut SessionState,
        env: &TransitionEnv<'_>,
        rng: &mut R,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &SessionState, _env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Event delivered to a session by its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SubmitAnswer(SubmitAnswer),
    TimerTick(TimerTick),
    AdvanceRound(AdvanceRound),
}

impl SessionEvent {
    pub fn submit_answer(entry: EntryId) -> Self {
        Self::SubmitAnswer(SubmitAnswer { entry })
    }

    pub fn timer_tick() -> Self {
        Self::TimerTick(TimerTick)
    }

    pub fn advance_round() -> Self {
        Self::AdvanceRound(AdvanceRound)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEvent::SubmitAnswer(_) => "submit_answer",
            SessionEvent::TimerTick(_) => "timer_tick",
            SessionEvent::AdvanceRound(_) => "advance_round",
        }
    }

    /// Phase in which this event is meaningful. Outside it the event is
    /// dropped without touching state.
    pub fn accepted_in(&self) -> SessionPhase {
        match self {
            SessionEvent::SubmitAnswer(_) | SessionEvent::TimerTick(_) => SessionPhase::Active,
            SessionEvent::AdvanceRound(_) => SessionPhase::RoundTransition,
        }
    }
}

/// Post-answer bookkeeping shared by answers and timeouts.
///
/// Awards points or takes a life, then moves the session to
/// `RoundTransition` or, when no lives remain, latches `GameOver`.
pub(crate) fn resolve_round(
    state: &mut SessionState,
    verdict: AnswerVerdict,
    selected: Option<EntryId>,
    ends_session: bool,
) -> Result<RoundResolution, SessionError> {
    let round = state.round.as_ref().ok_or(SessionError::NoActiveRound)?;
    let correct_entry = round.correct_entry().clone();
    let round_number = round.number;

    let score_awarded = if verdict.is_correct() {
        correct_entry.score_value
    } else {
        0
    };

    state.current_score = state.current_score.saturating_add(score_awarded);
    state.total_score_possible = state
        .total_score_possible
        .saturating_add(correct_entry.score_value);
    if !verdict.is_correct() && !ends_session {
        state.lives_remaining = state.lives_remaining.saturating_sub(1);
    }
    state.rounds_played += 1;

    let game_over = ends_session || state.lives_remaining == 0;
    if game_over {
        state.phase = SessionPhase::GameOver;
        state.is_over = true;
    } else {
        state.phase = SessionPhase::RoundTransition;
    }

    let resolution = RoundResolution {
        round: round_number,
        verdict,
        selected,
        correct_entry,
        score_awarded,
        lives_remaining: state.lives_remaining,
        game_over,
    };
    state.last_resolution = Some(resolution.clone());
    Ok(resolution)
}

/// Checks the phase/latch pairing every resolved round must leave behind.
pub(crate) fn check_resolved_phase(state: &SessionState) -> Result<(), SessionError> {
    let consistent = match state.phase {
        SessionPhase::GameOver => state.is_over,
        SessionPhase::RoundTransition => !state.is_over && state.lives_remaining > 0,
        SessionPhase::Active => false,
    };
    if consistent {
        Ok(())
    } else {
        Err(SessionError::InvariantViolated("resolved round left inconsistent phase"))
    }
}
