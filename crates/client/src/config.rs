//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use quiz_core::DifficultyLevel;

/// Configuration required to bootstrap the terminal client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `countries.json` and `config.toml`.
    pub data_dir: Option<PathBuf>,
    /// Directory holding the leaderboard slot.
    pub save_dir: Option<PathBuf>,
    /// Player name; prompted for when unset.
    pub player_name: Option<String>,
    pub difficulty: DifficultyLevel,
    pub seed: Option<u64>,
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `QUIZ_DATA_DIR` - Content directory (default: bundled data)
    /// - `QUIZ_SAVE_DIR` - Leaderboard directory (default: platform data dir)
    /// - `QUIZ_PLAYER` - Player name (default: prompt)
    /// - `QUIZ_DIFFICULTY` - `easy`, `medium`, `hard` or `1`-`3` (default: medium)
    /// - `QUIZ_SEED` - Fixed RNG seed (default: random)
    /// - `QUIZ_SESSION_ID` - Log directory name (default: timestamp)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self {
            data_dir: read("QUIZ_DATA_DIR").map(PathBuf::from),
            save_dir: read("QUIZ_SAVE_DIR").map(PathBuf::from),
            player_name: read("QUIZ_PLAYER").map(|name| name.trim().to_string()),
            session_id: read("QUIZ_SESSION_ID"),
            ..Self::default()
        };

        if let Some(difficulty) = read("QUIZ_DIFFICULTY").and_then(|v| v.trim().parse().ok()) {
            config.difficulty = difficulty;
        }
        config.seed = read("QUIZ_SEED").and_then(|v| v.trim().parse().ok());

        config
    }
}
