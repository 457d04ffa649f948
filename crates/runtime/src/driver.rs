//! Synchronous host API over one session.
//!
//! [`SessionDriver`] is what a host with its own event loop embeds: it owns
//! the catalog, the RNG, the leaderboard store and the current
//! [`SessionState`], and routes every host callback through
//! [`SessionEngine`]. Scheduling the per-second tick and the post-reveal
//! advance is left to the host; [`Runtime`](crate::Runtime) does it with
//! tokio timers.

use quiz_core::{
    CountryCatalog, DifficultyLevel, EntryId, PcgRng, QuizConfig, Round, ScoreRecord,
    SessionEngine, SessionEvent, SessionRules, SessionState, TransitionOutcome,
};
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::leaderboard::LeaderboardStore;
use crate::repository::LeaderboardRepository;

pub struct SessionDriver<R> {
    catalog: CountryCatalog,
    config: QuizConfig,
    store: LeaderboardStore<R>,
    rng: PcgRng,
    session: Option<SessionState>,
}

impl<R: LeaderboardRepository> SessionDriver<R> {
    pub fn new(
        catalog: CountryCatalog,
        config: QuizConfig,
        store: LeaderboardStore<R>,
        rng: PcgRng,
    ) -> Self {
        Self {
            catalog,
            config,
            store,
            rng,
            session: None,
        }
    }

    /// Start a fresh session, discarding any session in progress.
    ///
    /// Fails with an `InsufficientData` session error when the catalog cannot
    /// fill a round at `difficulty`; no session is left running in that case.
    pub fn start_session(&mut self, difficulty: DifficultyLevel, player_name: &str) -> Result<Round> {
        self.start_with_rules(difficulty.into(), player_name)
    }

    /// Start a session with custom option count and lives.
    pub fn start_with_rules(&mut self, rules: SessionRules, player_name: &str) -> Result<Round> {
        let player_name = self.config.player_name_or_default(player_name);
        let mut state = SessionState::new(player_name, rules, self.config.round_duration_secs);
        // Timers scheduled for a replaced session must stay stale.
        if let Some(previous) = self.session.take() {
            state = state.succeeding(previous.generation());
        }

        let round = SessionEngine::new(&mut state, &self.catalog, &self.config).start(&mut self.rng)?;
        info!(
            target: "runtime::session",
            player = state.player_name(),
            options = rules.option_count,
            lives = rules.starting_lives,
            "Session started"
        );
        self.session = Some(state);
        Ok(round)
    }

    /// The round currently on screen, if a session is running.
    pub fn current_round(&self) -> Option<&Round> {
        self.session.as_ref().and_then(SessionState::current_round)
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Generation of the running session, for tagging scheduled callbacks.
    pub fn generation(&self) -> Option<u64> {
        self.session.as_ref().map(SessionState::generation)
    }

    /// Answer the current round.
    pub fn submit_answer(&mut self, entry: EntryId) -> Result<TransitionOutcome> {
        self.execute(SessionEvent::submit_answer(entry))
    }

    /// One second of the countdown elapsed.
    pub fn tick(&mut self) -> Result<TransitionOutcome> {
        self.execute(SessionEvent::timer_tick())
    }

    /// The reveal delay elapsed; draw the next round.
    pub fn advance_round(&mut self) -> Result<TransitionOutcome> {
        self.execute(SessionEvent::advance_round())
    }

    /// Restart the current session with the same player and rules.
    pub fn reset_session(&mut self) -> Result<Round> {
        let session = self.session.as_mut().ok_or(RuntimeError::NoSession)?;
        let round = SessionEngine::new(session, &self.catalog, &self.config).reset(&mut self.rng)?;
        info!(
            target: "runtime::session",
            player = session.player_name(),
            "Session reset"
        );
        Ok(round)
    }

    /// Top `n` leaderboard records, highest first.
    pub fn leaderboard(&self, n: usize) -> Vec<ScoreRecord> {
        self.store.top_n(n)
    }

    pub fn store(&self) -> &LeaderboardStore<R> {
        &self.store
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    fn execute(&mut self, event: SessionEvent) -> Result<TransitionOutcome> {
        let session = self.session.as_mut().ok_or(RuntimeError::NoSession)?;
        let outcome =
            SessionEngine::new(session, &self.catalog, &self.config).execute(&event, &mut self.rng)?;

        if outcome.is_ignored() {
            debug!(
                target: "runtime::session",
                event = event.as_str(),
                outcome = ?outcome,
                "Event dropped"
            );
        }

        // The latch in `take_final_record` guarantees a single write per session.
        if let Some(record) = session.take_final_record() {
            info!(
                target: "runtime::session",
                player = %record.player_name,
                score = record.score,
                rounds = session.rounds_played(),
                "Session over"
            );
            if let Err(error) = self.store.record_score(&record) {
                warn!(
                    target: "runtime::session",
                    player = %record.player_name,
                    error = %error,
                    "Failed to save final score"
                );
                return Err(error);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryLeaderboardRepository;
    use quiz_core::{AnswerVerdict, SessionError, SessionPhase};

    fn driver(seed: u64) -> SessionDriver<InMemoryLeaderboardRepository> {
        let catalog = CountryCatalog::from_records([
            ("🇫🇷", "France", 10),
            ("🇮🇹", "Italy", 12),
            ("🇩🇪", "Germany", 8),
        ]);
        SessionDriver::new(
            catalog,
            QuizConfig::default(),
            LeaderboardStore::new(InMemoryLeaderboardRepository::new()),
            PcgRng::seed_from_u64(seed),
        )
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
    fn calls_before_start_report_no_session() {
        let mut driver = driver(1);
        assert!(driver.current_round().is_none());
        assert!(matches!(driver.tick(), Err(RuntimeError::NoSession)));
        assert!(matches!(driver.reset_session(), Err(RuntimeError::NoSession)));
    }

    #[test]
    fn game_over_writes_exactly_one_record() {
        let mut driver = driver(3);
        let round = driver.start_with_rules(SessionRules::new(2, 1), "Ann").unwrap();
        assert_eq!(round.options().len(), 2);

        let outcome = driver.submit_answer(wrong_option(&round)).unwrap();
        assert_eq!(outcome.resolution().map(|r| r.verdict), Some(AnswerVerdict::Incorrect));
        assert_eq!(driver.leaderboard(5), vec![ScoreRecord::new("Ann", 0)]);

        // Late events are dropped and never write again.
        assert!(driver.tick().unwrap().is_ignored());
        assert!(driver.advance_round().unwrap().is_ignored());
        assert_eq!(driver.store().repository().load_records().unwrap().len(), 1);
    }

    #[test]
    fn blank_player_name_uses_default() {
        let mut driver = driver(4);
        driver.start_session(DifficultyLevel::Easy, "   ").unwrap();
        assert_eq!(driver.state().map(SessionState::player_name), Some("Player"));
    }

    #[test]
    fn insufficient_catalog_leaves_no_session() {
        let mut driver = driver(5);
        let err = driver.start_session(DifficultyLevel::Hard, "Ann").unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Session(ref e) if matches!(e.session_error(), SessionError::InsufficientData(_))
        ));
        assert!(driver.state().is_none());
    }

    #[test]
    fn restarting_keeps_generations_increasing() {
        let mut driver = driver(6);
        driver.start_session(DifficultyLevel::Easy, "Ann").unwrap();
        let first = driver.generation().unwrap();

        driver.start_session(DifficultyLevel::Easy, "Bob").unwrap();
        assert!(driver.generation().unwrap() > first);
    }

    #[test]
    fn reveal_then_advance_draws_next_round() {
        let mut driver = driver(7);
        let round = driver.start_session(DifficultyLevel::Easy, "Ann").unwrap();
        driver.submit_answer(round.correct_entry().id).unwrap();
        assert_eq!(
            driver.state().map(SessionState::phase),
            Some(SessionPhase::RoundTransition)
        );

        let next = driver.advance_round().unwrap();
        assert!(matches!(next, TransitionOutcome::RoundStarted(ref r) if r.number == 2));
        assert_eq!(driver.current_round().map(|r| r.number), Some(2));
    }

    #[test]
    fn reset_after_game_over_starts_again() {
        let mut driver = driver(8);
        let round = driver.start_with_rules(SessionRules::new(2, 1), "Ann").unwrap();
        driver.submit_answer(wrong_option(&round)).unwrap();

        let fresh = driver.reset_session().unwrap();
        assert_eq!(fresh.number, 1);
        assert_eq!(driver.state().map(SessionState::is_over), Some(false));
    }
}
