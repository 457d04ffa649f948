use crate::config::TimeoutPolicy;
use crate::rng::RandomSource;
use crate::state::{AnswerVerdict, RoundResolution, SessionPhase, SessionState};

use super::{SessionError, SessionTransition, TransitionEnv, check_resolved_phase, resolve_round};

/// One second elapsed on the round clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerTick;

/// What a tick did to the round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// Clock still running.
    Running { time_remaining: u32 },
    /// Clock hit zero and the round resolved as a timeout.
    Expired(RoundResolution),
}

impl SessionTransition for TimerTick {
    type Error = SessionError;
    type Result = TickResult;

    fn pre_validate(&self, state: &SessionState, _env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        if state.round.is_none() {
            return Err(SessionError::NoActiveRound);
        }
        Ok(())
    }

    fn apply<R: RandomSource>(
        &self,
        state: &mut SessionState,
        env: &TransitionEnv<'_>,
        _rng: &mut R,
    ) -> Result<Self::Result, Self::Error> {
        state.time_remaining = state.time_remaining.saturating_sub(1);
        if state.time_remaining > 0 {
            return Ok(TickResult::Running {
                time_remaining: state.time_remaining,
            });
        }

        let ends_session = env.config.timeout_policy == TimeoutPolicy::EndSession;
        resolve_round(state, AnswerVerdict::TimedOut, None, ends_session).map(TickResult::Expired)
    }

    fn post_validate(&self, state: &SessionState, _env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        if state.phase == SessionPhase::Active {
            if state.time_remaining == 0 {
                return Err(SessionError::InvariantViolated("active round with an empty clock"));
            }
            return Ok(());
        }
        check_resolved_phase(state)
    }
}
