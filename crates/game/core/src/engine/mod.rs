//! Session event pipeline.
//!
//! The [`SessionEngine`] is the authoritative reducer for [`SessionState`].
//! It applies the `isOver` latch and phase gating, then routes every
//! accepted event through the same pre_validate → apply → post_validate
//! pipeline.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::catalog::CountryCatalog;
use crate::config::QuizConfig;
use crate::event::{SessionError, SessionEvent, TransitionEnv, advance};
use crate::rng::RandomSource;
use crate::round::{Round, RoundEngine};
use crate::state::{RoundResolution, SessionPhase, SessionState};

/// Why an event was dropped without touching state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The session already reached `GameOver`.
    SessionOver,
    /// The event does not apply to the current phase (a second answer during
    /// the reveal, or a late reveal callback after the round started).
    WrongPhase(SessionPhase),
}

/// Outcome of executing one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    Ignored(IgnoreReason),
    /// Clock ticked and the round is still open.
    Ticked { time_remaining: u32 },
    /// Round resolved by an answer or a timeout.
    Resolved(RoundResolution),
    /// A new round is on screen.
    RoundStarted(Round),
}

impl TransitionOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, TransitionOutcome::Ignored(_))
    }

    pub fn resolution(&self) -> Option<&RoundResolution> {
        match self {
            TransitionOutcome::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }
}

/// Drives one session's state machine.
///
/// Borrows the state for the duration of a host callback; the catalog and
/// config are read-only.
pub struct SessionEngine<'a> {
    state: &'a mut SessionState,
    env: TransitionEnv<'a>,
}

impl<'a> SessionEngine<'a> {
    pub fn new(state: &'a mut SessionState, catalog: &'a CountryCatalog, config: &'a QuizConfig) -> Self {
        Self {
            state,
            env: TransitionEnv::new(catalog, config),
        }
    }

    /// Draws the first round of a fresh session.
    ///
    /// Fails with `InsufficientData` when the catalog cannot fill the
    /// session's option count. Calling it again while a round is already
    /// active returns that round unchanged.
    pub fn start<R: RandomSource>(&mut self, rng: &mut R) -> Result<Round, ExecuteError> {
        if let (SessionPhase::Active, Some(round)) = (self.state.phase, &self.state.round) {
            return Ok(round.clone());
        }
        if self.state.is_over {
            return Err(ExecuteError::Start(SessionError::InvariantViolated(
                "cannot start a finished session without a reset",
            )));
        }

        RoundEngine::ensure_supported(self.env.catalog, self.state.rules.option_count)
            .map_err(|error| ExecuteError::Start(error.into()))?;
        advance::start_round(self.state, &self.env, rng).map_err(ExecuteError::Start)
    }

    /// Executes an event. Events that arrive after `GameOver` or outside the
    /// phase they belong to are dropped and reported as `Ignored`.
    pub fn execute<R: RandomSource>(
        &mut self,
        event: &SessionEvent,
        rng: &mut R,
    ) -> Result<TransitionOutcome, ExecuteError> {
        if self.state.is_over {
            return Ok(TransitionOutcome::Ignored(IgnoreReason::SessionOver));
        }
        if self.state.phase != event.accepted_in() {
            return Ok(TransitionOutcome::Ignored(IgnoreReason::WrongPhase(self.state.phase)));
        }

        transition::execute_transition(event, self.state, &self.env, rng)
    }

    /// Reinitializes the session and draws its first round.
    pub fn reset<R: RandomSource>(&mut self, rng: &mut R) -> Result<Round, ExecuteError> {
        self.state.reset();
        self.start(rng)
    }

    pub fn state(&self) -> &SessionState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntryId;
    use crate::config::TimeoutPolicy;
    use crate::rng::PcgRng;
    use crate::state::{AnswerVerdict, SessionRules};

    fn catalog() -> CountryCatalog {
        CountryCatalog::from_records([
            ("🇫🇷", "France", 10),
            ("🇮🇹", "Italy", 12),
            ("🇩🇪", "Germany", 8),
        ])
    }

    fn wrong_option(round: &Round) -> EntryId {
        round
            .options()
            .iter()
            .find(|entry| entry.id != round.correct_entry().id)
            .map(|entry| entry.id)
            .unwrap()
    }

    #[test]
    fn scenario_wrong_answer_with_one_life_ends_session() {
        let catalog = catalog();
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(2, 1), 30);
        let mut rng = PcgRng::seed_from_u64(5);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let round = engine.start(&mut rng).unwrap();
        assert_eq!(round.options().len(), 2);

        let outcome = engine
            .execute(&SessionEvent::submit_answer(wrong_option(&round)), &mut rng)
            .unwrap();
        let resolution = outcome.resolution().unwrap();
        assert_eq!(resolution.verdict, AnswerVerdict::Incorrect);
        assert!(resolution.game_over);

        assert_eq!(state.phase(), SessionPhase::GameOver);
        assert!(state.take_final_record().is_some());
        assert!(state.take_final_record().is_none());
    }

    #[test]
    fn correct_answer_adds_score_and_keeps_lives() {
        let catalog = catalog();
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(2, 3), 30);
        let mut rng = PcgRng::seed_from_u64(9);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let round = engine.start(&mut rng).unwrap();
        let correct = round.correct_entry().clone();
        engine
            .execute(&SessionEvent::submit_answer(correct.id), &mut rng)
            .unwrap();

        assert_eq!(state.current_score(), correct.score_value);
        assert_eq!(state.total_score_possible(), correct.score_value);
        assert_eq!(state.lives_remaining(), 3);
        assert_eq!(state.phase(), SessionPhase::RoundTransition);
    }

    #[test]
    fn wrong_answer_costs_exactly_one_life() {
        let catalog = catalog();
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(3, 3), 30);
        let mut rng = PcgRng::seed_from_u64(1);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let round = engine.start(&mut rng).unwrap();
        engine
            .execute(&SessionEvent::submit_answer(wrong_option(&round)), &mut rng)
            .unwrap();

        assert_eq!(state.lives_remaining(), 2);
        assert_eq!(state.current_score(), 0);
    }

    #[test]
    fn second_answer_during_reveal_is_ignored() {
        let catalog = catalog();
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(2, 3), 30);
        let mut rng = PcgRng::seed_from_u64(2);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let round = engine.start(&mut rng).unwrap();
        let wrong = wrong_option(&round);
        engine.execute(&SessionEvent::submit_answer(wrong), &mut rng).unwrap();

        let again = engine.execute(&SessionEvent::submit_answer(wrong), &mut rng).unwrap();
        let tick = engine.execute(&SessionEvent::timer_tick(), &mut rng).unwrap();
        assert_eq!(
            again,
            TransitionOutcome::Ignored(IgnoreReason::WrongPhase(SessionPhase::RoundTransition))
        );
        assert!(tick.is_ignored());
        assert_eq!(state.lives_remaining(), 2);
    }

    #[test]
    fn unknown_option_is_rejected_before_mutation() {
        let catalog = CountryCatalog::from_records(
            (0..6).map(|i| (format!("f{i}"), format!("C{i}"), 1)),
        );
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(2, 3), 30);
        let mut rng = PcgRng::seed_from_u64(4);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let round = engine.start(&mut rng).unwrap();
        let outsider = catalog
            .entries()
            .iter()
            .find(|entry| !round.contains(entry.id))
            .map(|entry| entry.id)
            .unwrap();

        let err = engine
            .execute(&SessionEvent::submit_answer(outsider), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::SubmitAnswer(TransitionPhaseError {
                phase: TransitionPhase::PreValidate,
                error: SessionError::UnknownOption { .. },
            })
        ));
        assert_eq!(state.phase(), SessionPhase::Active);
        assert_eq!(state.lives_remaining(), 3);
    }

    #[test]
    fn timer_expiry_costs_a_life_and_advance_resets_clock() {
        let catalog = catalog();
        let config = QuizConfig::default().with_round_duration(3);
        let mut state = SessionState::new("Ann", SessionRules::new(2, 3), 3);
        let mut rng = PcgRng::seed_from_u64(8);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        engine.start(&mut rng).unwrap();
        let first_generation = engine.state().generation();

        assert_eq!(
            engine.execute(&SessionEvent::timer_tick(), &mut rng).unwrap(),
            TransitionOutcome::Ticked { time_remaining: 2 }
        );
        engine.execute(&SessionEvent::timer_tick(), &mut rng).unwrap();
        let expired = engine.execute(&SessionEvent::timer_tick(), &mut rng).unwrap();

        let resolution = expired.resolution().unwrap();
        assert_eq!(resolution.verdict, AnswerVerdict::TimedOut);
        assert_eq!(resolution.lives_remaining, 2);
        assert!(!resolution.game_over);

        let next = engine.execute(&SessionEvent::advance_round(), &mut rng).unwrap();
        assert!(matches!(next, TransitionOutcome::RoundStarted(ref round) if round.number == 2));
        assert_eq!(state.time_remaining(), 3);
        assert!(state.generation() > first_generation);
    }

    #[test]
    fn end_session_policy_finishes_on_timeout() {
        let catalog = catalog();
        let config = QuizConfig::default().with_timeout_policy(TimeoutPolicy::EndSession);
        let mut state = SessionState::new("Ann", SessionRules::new(2, 3), 1);
        let mut rng = PcgRng::seed_from_u64(8);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        engine.start(&mut rng).unwrap();
        let outcome = engine.execute(&SessionEvent::timer_tick(), &mut rng).unwrap();

        assert!(outcome.resolution().unwrap().game_over);
        assert_eq!(state.lives_remaining(), 3);
        assert!(state.is_over());
    }

    #[test]
    fn events_after_game_over_are_dropped() {
        let catalog = catalog();
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(2, 1), 30);
        let mut rng = PcgRng::seed_from_u64(6);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let round = engine.start(&mut rng).unwrap();
        engine
            .execute(&SessionEvent::submit_answer(wrong_option(&round)), &mut rng)
            .unwrap();

        for event in [
            SessionEvent::submit_answer(round.correct_entry().id),
            SessionEvent::timer_tick(),
            SessionEvent::advance_round(),
        ] {
            assert_eq!(
                engine.execute(&event, &mut rng).unwrap(),
                TransitionOutcome::Ignored(IgnoreReason::SessionOver)
            );
        }
        assert_eq!(state.current_score(), 0);
    }

    #[test]
    fn start_reports_insufficient_data() {
        let catalog = catalog();
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(6, 2), 30);
        let mut rng = PcgRng::default();
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let err = engine.start(&mut rng).unwrap_err();
        assert!(matches!(err.session_error(), SessionError::InsufficientData(_)));
    }

    #[test]
    fn reset_starts_a_fresh_session() {
        let catalog = catalog();
        let config = QuizConfig::default();
        let mut state = SessionState::new("Ann", SessionRules::new(2, 1), 30);
        let mut rng = PcgRng::seed_from_u64(12);
        let mut engine = SessionEngine::new(&mut state, &catalog, &config);

        let round = engine.start(&mut rng).unwrap();
        engine
            .execute(&SessionEvent::submit_answer(wrong_option(&round)), &mut rng)
            .unwrap();
        let generation = engine.state().generation();

        let fresh = engine.reset(&mut rng).unwrap();
        assert_eq!(fresh.number, 1);
        assert_eq!(state.phase(), SessionPhase::Active);
        assert_eq!(state.lives_remaining(), 1);
        assert!(state.generation() > generation);
    }
}
