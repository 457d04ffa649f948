//! Plain-text rendering of quiz screens.

use std::fmt::Write;

use quiz_core::{AnswerVerdict, EntryId, Round, RoundResolution, ScoreRecord};

pub fn round(round: &Round, time_remaining: u32) -> String {
    let mut out = format!(
        "\nRound {}  [{}s]\n\n    {}\n\n",
        round.number,
        time_remaining,
        round.correct_entry().glyph
    );
    for (index, option) in round.options().iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", index + 1, option.name);
    }
    out.push_str("\nYour answer: ");
    out
}

/// Countdown line, shown every ten seconds and for the last five.
pub fn countdown(time_remaining: u32) -> Option<String> {
    (time_remaining <= 5 || time_remaining % 10 == 0)
        .then(|| format!("  {}s left", time_remaining))
}

pub fn resolution(resolution: &RoundResolution) -> String {
    let entry = &resolution.correct_entry;
    let headline = match resolution.verdict {
        AnswerVerdict::Correct => format!("{}! +{}", resolution.verdict.label(), resolution.score_awarded),
        AnswerVerdict::Incorrect | AnswerVerdict::TimedOut => format!(
            "{}! It was {} {}",
            resolution.verdict.label(),
            entry.glyph,
            entry.name
        ),
    };
    format!("{}  (lives: {})", headline, resolution.lives_remaining)
}

pub fn session_over(record: &ScoreRecord, total_score_possible: u32, rounds_played: u32) -> String {
    format!(
        "\nGame over, {}. You scored {} of {} possible points in {} rounds.",
        record.player_name, record.score, total_score_possible, rounds_played
    )
}

pub fn leaderboard(records: &[ScoreRecord]) -> String {
    if records.is_empty() {
        return "No high scores yet.".to_string();
    }

    let mut out = String::from("High scores\n");
    for (rank, record) in records.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {:<16} {:>6}", rank + 1, record.player_name, record.score);
    }
    out
}

pub const HELP: &str = "Type an option number to answer. [s] scores  [c] clear scores  [r] restart  [q] quit";

/// Maps a 1-based option number typed by the player to its entry.
pub fn parse_choice(input: &str, round: &Round) -> Option<EntryId> {
    let index: usize = input.trim().parse().ok()?;
    let option = round.options().get(index.checked_sub(1)?)?;
    Some(option.id)
}
