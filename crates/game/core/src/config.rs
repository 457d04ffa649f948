/// What happens when the round timer runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeoutPolicy {
    /// Treat expiry as a wrong answer: one life is lost and play continues.
    #[default]
    LoseLife,
    /// Expiry ends the session immediately.
    EndSession,
}

/// Quiz configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuizConfig {
    /// Seconds on the clock at the start of every round.
    pub round_duration_secs: u32,
    /// Pause between resolving a round and drawing the next one.
    pub reveal_delay_ms: u64,
    /// Number of records shown on the leaderboard screen.
    pub leaderboard_size: usize,
    /// Name recorded when the player leaves the name field blank.
    pub default_player_name: String,
    pub timeout_policy: TimeoutPolicy,
}

impl QuizConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROUND_DURATION_SECS: u32 = 30;
    pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1500;
    pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;
    pub const DEFAULT_PLAYER_NAME: &'static str = "Player";

    pub fn new() -> Self {
        Self {
            round_duration_secs: Self::DEFAULT_ROUND_DURATION_SECS,
            reveal_delay_ms: Self::DEFAULT_REVEAL_DELAY_MS,
            leaderboard_size: Self::DEFAULT_LEADERBOARD_SIZE,
            default_player_name: Self::DEFAULT_PLAYER_NAME.to_string(),
            timeout_policy: TimeoutPolicy::default(),
        }
    }

    pub fn with_round_duration(mut self, secs: u32) -> Self {
        self.round_duration_secs = secs.max(1);
        self
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    /// Resolves the name to record for a session, falling back to the
    /// configured default when `name` is blank.
    pub fn player_name_or_default(&self, name: &str) -> String {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            self.default_player_name.clone()
        } else {
            trimmed.to_string()
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new()
    }
}
