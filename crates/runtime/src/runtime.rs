//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to play sessions asynchronously.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use quiz_content::ContentFactory;
use quiz_core::{CountryCatalog, PcgRng, QuizConfig};

use crate::api::{QuizEvent, Result, RuntimeError, RuntimeHandle};
use crate::driver::SessionDriver;
use crate::leaderboard::LeaderboardStore;
use crate::repository::{InMemoryLeaderboardRepository, LeaderboardRepository};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub quiz_config: QuizConfig,
    /// Fixed RNG seed; drawn from OS entropy when `None`.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            quiz_config: QuizConfig::default(),
            seed: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts one quiz session at a time.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<QuizEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// Waits for the worker, which stops once every outstanding handle clone
    /// has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<CountryCatalog>,
    repository: Option<Box<dyn LeaderboardRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn quiz_config(mut self, quiz_config: QuizConfig) -> Self {
        self.config.quiz_config = quiz_config;
        self
    }

    /// Set the country catalog (required)
    pub fn catalog(mut self, catalog: CountryCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Load catalog and quiz config from a content directory.
    pub fn content(mut self, factory: &ContentFactory) -> Result<Self> {
        self.catalog = Some(factory.load_catalog()?);
        self.config.quiz_config = factory.load_config()?;
        Ok(self)
    }

    /// Set the leaderboard repository. Defaults to an in-memory slot.
    pub fn repository(mut self, repository: impl LeaderboardRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Fix the RNG seed so every draw can be replayed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Box::new(InMemoryLeaderboardRepository::new()));

        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        info!(
            target: "runtime",
            seed,
            entries = catalog.len(),
            "Building quiz runtime"
        );

        let driver = SessionDriver::new(
            catalog,
            self.config.quiz_config,
            LeaderboardStore::new(repository),
            PcgRng::seed_from_u64(seed),
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<QuizEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let worker = SessionWorker::new(driver, command_rx, event_tx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
