use crate::rng::RandomSource;
use crate::round::{Round, RoundEngine};
use crate::state::{SessionPhase, SessionState};

use super::{SessionError, SessionTransition, TransitionEnv};

/// Reveal delay elapsed: draw the next round and restart the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceRound;

impl SessionTransition for AdvanceRound {
    type Error = SessionError;
    type Result = Round;

    fn pre_validate(&self, state: &SessionState, env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        RoundEngine::ensure_supported(env.catalog, state.rules.option_count)?;
        Ok(())
    }

    fn apply<R: RandomSource>(
        &self,
        state: &mut SessionState,
        env: &TransitionEnv<'_>,
        rng: &mut R,
    ) -> Result<Self::Result, Self::Error> {
        start_round(state, env, rng)
    }

    fn post_validate(&self, state: &SessionState, _env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        if state.phase != SessionPhase::Active || state.round.is_none() {
            return Err(SessionError::InvariantViolated("advanced round is not active"));
        }
        Ok(())
    }
}

/// Draws a round into `state`, resets the clock and bumps the generation.
pub(crate) fn start_round<R: RandomSource>(
    state: &mut SessionState,
    env: &TransitionEnv<'_>,
    rng: &mut R,
) -> Result<Round, SessionError> {
    let number = state.rounds_played + 1;
    let round = RoundEngine::next_round(
        env.catalog,
        &mut state.used_entries,
        state.rules.option_count,
        number,
        rng,
    )?;

    state.round = Some(round.clone());
    state.time_remaining = state.round_duration_secs;
    state.phase = SessionPhase::Active;
    state.generation += 1;
    Ok(round)
}
