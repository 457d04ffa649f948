//! Flag quiz terminal client.
//!
//! This binary is the composition root that assembles:
//! 1. Content (catalog and quiz config) via `ContentFactory`
//! 2. Leaderboard persistence via `FileLeaderboardRepository`
//! 3. Runtime (session worker and timers) via `RuntimeBuilder`
//! 4. The line-based terminal front end
//!
//! # Examples
//!
//! ```bash
//! QUIZ_PLAYER=Ann QUIZ_DIFFICULTY=hard cargo run -p quiz-client
//! ```

mod app;
mod config;
mod logging;
mod view;

use anyhow::{Context, Result};
use quiz_content::ContentFactory;
use quiz_core::DifficultyLevel;
use quiz_runtime::{FileLeaderboardRepository, Runtime};

use app::QuizApp;
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(config.session_id.as_deref())?;

    tracing::info!("Starting flag quiz");

    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    let catalog = factory
        .load_catalog()
        .with_context(|| format!("loading catalog from {}", factory.data_dir().display()))?;
    let quiz_config = factory.load_config().context("loading quiz config")?;

    let difficulty = fit_difficulty(config.difficulty, catalog.len())
        .with_context(|| format!("catalog has only {} entries", catalog.len()))?;

    let repository = match &config.save_dir {
        Some(dir) => FileLeaderboardRepository::new(dir),
        None => FileLeaderboardRepository::in_default_location(),
    }
    .context("opening leaderboard")?;
    tracing::info!("Leaderboard: {}", repository.path().display());

    let leaderboard_size = quiz_config.leaderboard_size;
    let mut builder = Runtime::builder()
        .catalog(catalog)
        .quiz_config(quiz_config)
        .repository(repository);
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let runtime = builder.build().await?;

    QuizApp::new(
        runtime.handle(),
        difficulty,
        config.player_name,
        leaderboard_size,
    )
    .run()
    .await?;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Falls back to an easier level when the catalog cannot fill `requested`.
fn fit_difficulty(requested: DifficultyLevel, catalog_len: usize) -> Option<DifficultyLevel> {
    if requested.option_count() <= catalog_len {
        return Some(requested);
    }
    let fallback = DifficultyLevel::largest_fitting(catalog_len)?;
    tracing::warn!(
        requested = %requested,
        fallback = %fallback,
        "Catalog too small for the requested difficulty"
    );
    Some(fallback)
}
