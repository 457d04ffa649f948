use crate::catalog::EntryId;
use crate::rng::RandomSource;
use crate::state::{AnswerVerdict, RoundResolution, SessionState};

use super::{SessionError, SessionTransition, TransitionEnv, check_resolved_phase, resolve_round};

/// The player picked one of the round's options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitAnswer {
    pub entry: EntryId,
}

impl SessionTransition for SubmitAnswer {
    type Error = SessionError;
    type Result = RoundResolution;

    fn pre_validate(&self, state: &SessionState, _env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        let round = state.round.as_ref().ok_or(SessionError::NoActiveRound)?;
        if !round.contains(self.entry) {
            return Err(SessionError::UnknownOption {
                entry: self.entry,
                round: round.number,
            });
        }
        Ok(())
    }

    fn apply<R: RandomSource>(
        &self,
        state: &mut SessionState,
        _env: &TransitionEnv<'_>,
        _rng: &mut R,
    ) -> Result<Self::Result, Self::Error> {
        let round = state.round.as_ref().ok_or(SessionError::NoActiveRound)?;
        let verdict = if round.is_correct(self.entry) {
            AnswerVerdict::Correct
        } else {
            AnswerVerdict::Incorrect
        };
        resolve_round(state, verdict, Some(self.entry), false)
    }

    fn post_validate(&self, state: &SessionState, _env: &TransitionEnv<'_>) -> Result<(), Self::Error> {
        check_resolved_phase(state)
    }
}
