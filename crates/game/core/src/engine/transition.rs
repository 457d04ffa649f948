//! Event dispatch and execution logic.

use crate::event::{SessionEvent, SessionTransition, TransitionEnv, TickResult};
use crate::rng::RandomSource;
use crate::state::SessionState;

use super::TransitionOutcome;
use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the session state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T, R>(
    transition: &T,
    state: &mut SessionState,
    env: &TransitionEnv<'_>,
    rng: &mut R,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: SessionTransition,
    R: RandomSource,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env, rng)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each event to its transition and wraps the result.
pub(super) fn execute_transition<R: RandomSource>(
    event: &SessionEvent,
    state: &mut SessionState,
    env: &TransitionEnv<'_>,
    rng: &mut R,
) -> Result<TransitionOutcome, ExecuteError> {
    match event {
        SessionEvent::SubmitAnswer(transition) => {
            let resolution =
                drive_transition(transition, state, env, rng).map_err(ExecuteError::SubmitAnswer)?;
            Ok(TransitionOutcome::Resolved(resolution))
        }
        SessionEvent::TimerTick(transition) => {
            match drive_transition(transition, state, env, rng).map_err(ExecuteError::TimerTick)? {
                TickResult::Running { time_remaining } => {
                    Ok(TransitionOutcome::Ticked { time_remaining })
                }
                TickResult::Expired(resolution) => Ok(TransitionOutcome::Resolved(resolution)),
            }
        }
        SessionEvent::AdvanceRound(transition) => {
            let round =
                drive_transition(transition, state, env, rng).map_err(ExecuteError::AdvanceRound)?;
            Ok(TransitionOutcome::RoundStarted(round))
        }
    }
}
