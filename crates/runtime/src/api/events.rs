//! Events emitted by the session worker for front-ends to observe.
//!
//! Consumers subscribe to [`QuizEvent`] to redraw without polling the worker.
use quiz_core::{Round, RoundResolution, ScoreRecord};
use serde::{Deserialize, Serialize};

/// Events emitted by the runtime while a session runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizEvent {
    /// A new round is on screen with a full countdown.
    RoundStarted { round: Round, time_remaining: u32 },
    /// One second of the countdown elapsed.
    TimerTicked { time_remaining: u32 },
    /// The round was answered or timed out; the correct entry is revealed.
    RoundResolved(RoundResolution),
    /// The session reached game over.
    SessionOver {
        record: ScoreRecord,
        total_score_possible: u32,
        rounds_played: u32,
    },
    /// The final score could not be written to the leaderboard.
    ScoreNotSaved { record: ScoreRecord, error: String },
}
