//! Authoritative session state.
//!
//! [`SessionState`] holds everything one playthrough tracks: lives, score,
//! countdown, the current round and the set of entries already asked. Hosts
//! read it freely but mutate it exclusively through
//! [`SessionEngine`](crate::engine::SessionEngine).

use crate::catalog::{CountryEntry, EntryId};
use crate::difficulty::DifficultyLevel;
use crate::leaderboard::ScoreRecord;
use crate::round::{Round, UsedEntries};

/// Where the session currently sits in its state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionPhase {
    /// A round is on screen and accepts one answer or a timeout.
    #[default]
    Active,
    /// The last round has been resolved; waiting for the reveal delay.
    RoundTransition,
    /// Terminal for this session.
    GameOver,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Active => "active",
            SessionPhase::RoundTransition => "round_transition",
            SessionPhase::GameOver => "game_over",
        }
    }
}

/// Option count and lives for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRules {
    pub option_count: usize,
    pub starting_lives: u32,
}

impl SessionRules {
    /// Custom rules. Lives are clamped to at least one.
    pub fn new(option_count: usize, starting_lives: u32) -> Self {
        Self {
            option_count,
            starting_lives: starting_lives.max(1),
        }
    }
}

impl From<DifficultyLevel> for SessionRules {
    fn from(level: DifficultyLevel) -> Self {
        Self::new(level.option_count(), level.starting_lives())
    }
}

/// How a round was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnswerVerdict {
    Correct,
    Incorrect,
    TimedOut,
}

impl AnswerVerdict {
    /// Feedback banner text.
    pub fn label(&self) -> &'static str {
        match self {
            AnswerVerdict::Correct => "Correct",
            AnswerVerdict::Incorrect => "Wrong",
            AnswerVerdict::TimedOut => "Time's up",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerVerdict::Correct)
    }
}

/// Result of resolving one round, kept for the reveal screen.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResolution {
    pub round: u32,
    pub verdict: AnswerVerdict,
    /// Option picked by the player; `None` on timeout.
    pub selected: Option<EntryId>,
    /// Revealed after every answer, right or wrong.
    pub correct_entry: CountryEntry,
    pub score_awarded: u32,
    pub lives_remaining: u32,
    pub game_over: bool,
}

/// State of one playthrough from start to game over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) player_name: String,
    pub(crate) rules: SessionRules,
    pub(crate) round_duration_secs: u32,

    pub(crate) lives_remaining: u32,
    pub(crate) current_score: u32,
    /// Sum of the score values of every resolved round.
    pub(crate) total_score_possible: u32,
    pub(crate) time_remaining: u32,
    pub(crate) used_entries: UsedEntries,
    /// Latch set on entering `GameOver`; later events are dropped.
    pub(crate) is_over: bool,
    pub(crate) phase: SessionPhase,
    pub(crate) round: Option<Round>,
    pub(crate) rounds_played: u32,
    /// Bumped whenever a round starts or the session resets. Timer callbacks
    /// carry the generation they were scheduled for.
    pub(crate) generation: u64,
    pub(crate) last_resolution: Option<RoundResolution>,
    score_recorded: bool,
}

impl SessionState {
    pub fn new(player_name: impl Into<String>, rules: SessionRules, round_duration_secs: u32) -> Self {
        let round_duration_secs = round_duration_secs.max(1);
        Self {
            player_name: player_name.into(),
            rules,
            round_duration_secs,
            lives_remaining: rules.starting_lives,
            current_score: 0,
            total_score_possible: 0,
            time_remaining: round_duration_secs,
            used_entries: UsedEntries::new(),
            is_over: false,
            phase: SessionPhase::Active,
            round: None,
            rounds_played: 0,
            generation: 0,
            last_resolution: None,
            score_recorded: false,
        }
    }

    /// Reinitializes every field for a fresh playthrough with the same player
    /// and rules. The generation keeps counting so callbacks scheduled before
    /// the reset stay stale.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::new(
            std::mem::take(&mut self.player_name),
            self.rules,
            self.round_duration_secs,
        );
        self.generation = generation;
    }

    /// Continues the generation count of a session this one replaces.
    pub fn succeeding(mut self, previous_generation: u64) -> Self {
        self.generation = self.generation.max(previous_generation + 1);
        self
    }

    /// Yields the final score record once the session is over.
    ///
    /// Returns `Some` exactly once per session so the leaderboard is written
    /// a single time no matter how many callers observe `GameOver`.
    pub fn take_final_record(&mut self) -> Option<ScoreRecord> {
        if !self.is_over || self.score_recorded {
            return None;
        }
        self.score_recorded = true;
        Some(ScoreRecord::new(self.player_name.clone(), self.current_score))
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn rules(&self) -> SessionRules {
        self.rules
    }

    pub fn round_duration_secs(&self) -> u32 {
        self.round_duration_secs
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn total_score_possible(&self) -> u32 {
        self.total_score_possible
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn used_entries(&self) -> &UsedEntries {
        &self.used_entries
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_resolution(&self) -> Option<&RoundResolution> {
        self.last_resolution.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_active_with_full_budget() {
        let state = SessionState::new("Ann", DifficultyLevel::Medium.into(), 30);
        assert_eq!(state.phase(), SessionPhase::Active);
        assert_eq!(state.lives_remaining(), 3);
        assert_eq!(state.time_remaining(), 30);
        assert_eq!(state.current_score(), 0);
        assert!(!state.is_over());
        assert!(state.current_round().is_none());
    }

    #[test]
    fn final_record_is_yielded_once() {
        let mut state = SessionState::new("Ann", SessionRules::new(2, 1), 30);
        assert!(state.take_final_record().is_none());

        state.is_over = true;
        state.phase = SessionPhase::GameOver;
        state.current_score = 42;

        assert_eq!(state.take_final_record(), Some(ScoreRecord::new("Ann", 42)));
        assert!(state.take_final_record().is_none());
    }

    #[test]
    fn reset_keeps_identity_and_bumps_generation() {
        let mut state = SessionState::new("Ann", SessionRules::new(4, 3), 10);
        state.generation = 5;
        state.lives_remaining = 0;
        state.is_over = true;
        state.current_score = 17;

        state.reset();

        assert_eq!(state.player_name(), "Ann");
        assert_eq!(state.lives_remaining(), 3);
        assert_eq!(state.time_remaining(), 10);
        assert_eq!(state.current_score(), 0);
        assert!(!state.is_over());
        assert_eq!(state.generation(), 6);
    }

    #[test]
    fn succeeding_session_outranks_previous_generation() {
        let state = SessionState::new("Bob", SessionRules::new(2, 1), 30).succeeding(9);
        assert_eq!(state.generation(), 10);
    }

    #[test]
    fn rules_clamp_lives() {
        assert_eq!(SessionRules::new(2, 0).starting_lives, 1);
    }
}
