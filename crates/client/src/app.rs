//! Line-based terminal front end.
//!
//! Reads one line at a time from stdin while rendering runtime events as
//! they arrive. The countdown keeps running while the prompt waits.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use quiz_core::{DifficultyLevel, QuizError, Round};
use quiz_runtime::{QuizEvent, RuntimeError, RuntimeHandle};

use crate::view;

pub struct QuizApp {
    handle: RuntimeHandle,
    difficulty: DifficultyLevel,
    player_name: Option<String>,
    leaderboard_size: usize,
    current_round: Option<Round>,
}

enum Flow {
    Continue,
    Quit,
}

impl QuizApp {
    pub fn new(
        handle: RuntimeHandle,
        difficulty: DifficultyLevel,
        player_name: Option<String>,
        leaderboard_size: usize,
    ) -> Self {
        Self {
            handle,
            difficulty,
            player_name,
            leaderboard_size,
            current_round: None,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let player_name = match self.player_name.take() {
            Some(name) => name,
            None => {
                print_inline("Your name (leave blank for the default): ").await?;
                lines.next_line().await?.unwrap_or_default()
            }
        };

        println!("{}", view::HELP);
        let mut events = self.handle.subscribe();
        self.handle.start_session(self.difficulty, player_name).await?;
        info!(difficulty = %self.difficulty, "Quiz started");

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => self.on_event(event).await?,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if let Flow::Quit = self.on_input(line.trim()).await? {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }

        info!("Quiz closed");
        Ok(())
    }

    async fn on_event(&mut self, event: QuizEvent) -> Result<()> {
        match event {
            QuizEvent::RoundStarted {
                round,
                time_remaining,
            } => {
                print_inline(&view::round(&round, time_remaining)).await?;
                self.current_round = Some(round);
            }
            QuizEvent::TimerTicked { time_remaining } => {
                if let Some(line) = view::countdown(time_remaining) {
                    println!("{}", line);
                }
            }
            QuizEvent::RoundResolved(resolution) => {
                println!("{}", view::resolution(&resolution));
                self.current_round = None;
            }
            QuizEvent::SessionOver {
                record,
                total_score_possible,
                rounds_played,
            } => {
                println!(
                    "{}",
                    view::session_over(&record, total_score_possible, rounds_played)
                );
                self.show_leaderboard().await?;
                println!("[r] play again  [q] quit");
            }
            QuizEvent::ScoreNotSaved { record, error } => {
                println!("Could not save the score of {}: {}", record.player_name, error);
            }
        }
        Ok(())
    }

    async fn on_input(&mut self, input: &str) -> Result<Flow> {
        match input {
            "" => {}
            "q" | "quit" => return Ok(Flow::Quit),
            "s" | "scores" => self.show_leaderboard().await?,
            "c" | "clear" => {
                self.handle.clear_leaderboard().await?;
                println!("High scores cleared.");
            }
            "r" | "restart" => {
                self.handle.reset_session().await?;
            }
            "h" | "help" => println!("{}", view::HELP),
            choice => self.answer(choice).await?,
        }
        Ok(Flow::Continue)
    }

    async fn answer(&mut self, choice: &str) -> Result<()> {
        let Some(round) = &self.current_round else {
            println!("Wait for the next flag.");
            return Ok(());
        };
        let Some(entry) = view::parse_choice(choice, round) else {
            println!("Pick a number between 1 and {}.", round.options().len());
            return Ok(());
        };

        match self.handle.submit_answer(entry).await {
            Ok(outcome) if outcome.is_ignored() => {
                debug!(?outcome, "Answer arrived after the round closed");
            }
            Ok(_) => {}
            Err(RuntimeError::Session(error)) => {
                warn!(code = error.error_code(), error = %error, "Answer rejected");
                println!("That answer was not accepted.");
            }
            // Reported to the player through `ScoreNotSaved`.
            Err(RuntimeError::Repository(error)) => {
                warn!(error = %error, "Final score not saved");
            }
            Err(error) => return Err(error.into()),
        }
        Ok(())
    }

    async fn show_leaderboard(&self) -> Result<()> {
        let records = self.handle.leaderboard(self.leaderboard_size).await?;
        println!("{}", view::leaderboard(&records));
        Ok(())
    }
}

async fn print_inline(text: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

