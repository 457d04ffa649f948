//! Session worker that owns the authoritative [`SessionDriver`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle) and timer
//! signals from its own ticker and reveal tasks, applies them one at a time,
//! and publishes [`QuizEvent`] notifications.

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Duration;
use tracing::{debug, warn};

use quiz_core::{
    DifficultyLevel, EntryId, Round, ScoreRecord, SessionPhase, SessionState, TransitionOutcome,
};

use super::timers::{TimerSignal, Timers};
use crate::api::{QuizEvent, Result, RuntimeError};
use crate::driver::SessionDriver;
use crate::repository::LeaderboardRepository;

/// Commands that can be sent to the session worker
pub enum Command {
    /// Start a new session, replacing the current one.
    StartSession {
        difficulty: DifficultyLevel,
        player_name: String,
        reply: oneshot::Sender<Result<Round>>,
    },
    CurrentRound {
        reply: oneshot::Sender<Option<Round>>,
    },
    SubmitAnswer {
        entry: EntryId,
        reply: oneshot::Sender<Result<TransitionOutcome>>,
    },
    /// Manual countdown step, independent of the ticker.
    Tick {
        reply: oneshot::Sender<Result<TransitionOutcome>>,
    },
    ResetSession {
        reply: oneshot::Sender<Result<Round>>,
    },
    Leaderboard {
        n: usize,
        reply: oneshot::Sender<Vec<ScoreRecord>>,
    },
    ClearLeaderboard {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current session state (read-only).
    QueryState {
        reply: oneshot::Sender<Option<SessionState>>,
    },
}

/// Background task that processes session commands.
pub struct SessionWorker<R> {
    driver: SessionDriver<R>,
    command_rx: mpsc::Receiver<Command>,
    signal_rx: mpsc::Receiver<TimerSignal>,
    event_tx: broadcast::Sender<QuizEvent>,
    timers: Timers,
    /// Generation whose game over was already announced.
    announced_over: Option<u64>,
}

impl<R: LeaderboardRepository> SessionWorker<R> {
    const SIGNAL_BUFFER: usize = 16;

    /// Creates a new session worker.
    pub fn new(
        driver: SessionDriver<R>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<QuizEvent>,
    ) -> Self {
        let (signal_tx, signal_rx) = mpsc::channel(Self::SIGNAL_BUFFER);
        let reveal_delay = Duration::from_millis(driver.config().reveal_delay_ms);
        Self {
            driver,
            command_rx,
            signal_rx,
            event_tx,
            timers: Timers::new(signal_tx, reveal_delay),
            announced_over: None,
        }
    }

    /// Main worker loop. Ends when every handle is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(signal) = self.signal_rx.recv() => {
                    self.handle_signal(signal);
                }
            }
        }
        self.timers.abort_all();
        debug!(target: "runtime::worker", "Session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartSession {
                difficulty,
                player_name,
                reply,
            } => {
                self.timers.abort_all();
                let result = self.driver.start_session(difficulty, &player_name);
                self.after_start(&result);
                let _ = reply.send(result);
            }
            Command::CurrentRound { reply } => {
                let _ = reply.send(self.driver.current_round().cloned());
            }
            Command::SubmitAnswer { entry, reply } => {
                let result = self.driver.submit_answer(entry);
                self.after_event(&result);
                let _ = reply.send(result);
            }
            Command::Tick { reply } => {
                let result = self.driver.tick();
                self.after_event(&result);
                let _ = reply.send(result);
            }
            Command::ResetSession { reply } => {
                self.timers.abort_all();
                let result = self.driver.reset_session();
                self.after_start(&result);
                let _ = reply.send(result);
            }
            Command::Leaderboard { n, reply } => {
                let _ = reply.send(self.driver.leaderboard(n));
            }
            Command::ClearLeaderboard { reply } => {
                let _ = reply.send(self.driver.store().clear());
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.driver.state().cloned());
            }
        }
    }

    fn handle_signal(&mut self, signal: TimerSignal) {
        if self.driver.generation() != Some(signal.generation()) {
            debug!(
                target: "runtime::worker",
                signal = ?signal,
                "Dropping stale timer signal"
            );
            return;
        }

        let result = match signal {
            TimerSignal::Tick { .. } => self.driver.tick(),
            TimerSignal::Reveal { .. } => self.driver.advance_round(),
        };
        if let Err(error) = &result {
            warn!(
                target: "runtime::worker",
                signal = ?signal,
                error = %error,
                "Timer signal failed"
            );
        }
        self.after_event(&result);
    }

    fn after_start(&mut self, result: &Result<Round>) {
        if let Ok(round) = result {
            self.publish_round_started(round.clone());
        }
        self.reconcile_timers();
    }

    fn after_event(&mut self, result: &Result<TransitionOutcome>) {
        match result {
            Ok(TransitionOutcome::Ticked { time_remaining }) => {
                self.publish(QuizEvent::TimerTicked {
                    time_remaining: *time_remaining,
                });
            }
            Ok(TransitionOutcome::Resolved(resolution)) => {
                self.publish(QuizEvent::RoundResolved(resolution.clone()));
            }
            Ok(TransitionOutcome::RoundStarted(round)) => {
                self.publish_round_started(round.clone());
            }
            Ok(TransitionOutcome::Ignored(_)) => {}
            Err(error @ (RuntimeError::Repository(_) | RuntimeError::Leaderboard(_))) => {
                if let Some(state) = self.driver.state() {
                    let record = ScoreRecord::new(state.player_name(), state.current_score());
                    self.publish(QuizEvent::ScoreNotSaved {
                        record,
                        error: error.to_string(),
                    });
                }
            }
            Err(_) => {}
        }
        self.reconcile_timers();
    }

    /// Aligns the pending timers with the session phase and announces game
    /// over once per session.
    fn reconcile_timers(&mut self) {
        let Some(state) = self.driver.state() else {
            self.timers.abort_all();
            return;
        };

        let generation = state.generation();
        match state.phase() {
            SessionPhase::Active => self.timers.ensure_ticker(generation),
            SessionPhase::RoundTransition => self.timers.ensure_reveal(generation),
            SessionPhase::GameOver => {
                self.timers.abort_all();
                if self.announced_over != Some(generation) {
                    self.announced_over = Some(generation);
                    let event = QuizEvent::SessionOver {
                        record: ScoreRecord::new(state.player_name(), state.current_score()),
                        total_score_possible: state.total_score_possible(),
                        rounds_played: state.rounds_played(),
                    };
                    self.publish(event);
                }
            }
        }
    }

    fn publish_round_started(&self, round: Round) {
        let time_remaining = self
            .driver
            .state()
            .map(SessionState::time_remaining)
            .unwrap_or_default();
        self.publish(QuizEvent::RoundStarted {
            round,
            time_remaining,
        });
    }

    fn publish(&self, event: QuizEvent) {
        // No subscribers is normal.
        let _ = self.event_tx.send(event);
    }
}
