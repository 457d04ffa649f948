//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! playing a session or streaming its events.
use tokio::sync::{broadcast, mpsc, oneshot};

use quiz_core::{DifficultyLevel, EntryId, Round, ScoreRecord, SessionState, TransitionOutcome};

use super::errors::{Result, RuntimeError};
use super::events::QuizEvent;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<QuizEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<QuizEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start a new session and its countdown. Replaces any running session.
    ///
    /// A blank `player_name` falls back to the configured default.
    pub async fn start_session(
        &self,
        difficulty: DifficultyLevel,
        player_name: impl Into<String>,
    ) -> Result<Round> {
        let player_name = player_name.into();
        self.request(|reply| Command::StartSession {
            difficulty,
            player_name,
            reply,
        })
        .await?
    }

    /// The round currently on screen, if any.
    pub async fn current_round(&self) -> Result<Option<Round>> {
        self.request(|reply| Command::CurrentRound { reply }).await
    }

    /// Answer the current round.
    pub async fn submit_answer(&self, entry: EntryId) -> Result<TransitionOutcome> {
        self.request(|reply| Command::SubmitAnswer { entry, reply })
            .await?
    }

    /// Advance the countdown by one second without waiting for the ticker.
    pub async fn tick(&self) -> Result<TransitionOutcome> {
        self.request(|reply| Command::Tick { reply }).await?
    }

    /// Top `n` leaderboard records, highest first.
    pub async fn leaderboard(&self, n: usize) -> Result<Vec<ScoreRecord>> {
        self.request(|reply| Command::Leaderboard { n, reply }).await
    }

    /// Remove every leaderboard record.
    pub async fn clear_leaderboard(&self) -> Result<()> {
        self.request(|reply| Command::ClearLeaderboard { reply })
            .await?
    }

    /// Restart the current session with the same player and difficulty.
    pub async fn reset_session(&self) -> Result<Round> {
        self.request(|reply| Command::ResetSession { reply }).await?
    }

    /// Query the current session state (read-only snapshot)
    pub async fn query_state(&self) -> Result<Option<SessionState>> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<QuizEvent> {
        self.event_tx.subscribe()
    }
}
