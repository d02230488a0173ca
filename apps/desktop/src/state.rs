//! Application state.

use crate::assistant::Conversation;
use crate::commands::CommandError;
use crate::config::AppConfig;
use crate::dataset::DatasetProvider;
use crate::db::SqliteRepository;
use bisaya_core::{PracticeSession, PracticeSettings, ProgressionState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

/// A practice session in progress.
#[derive(Debug)]
pub struct ActiveSession {
    pub id: Uuid,
    pub session: PracticeSession,
    /// Settings captured when the session started.
    pub settings: PracticeSettings,
}

/// In-memory progression plus the session being played.
#[derive(Debug)]
pub struct PracticeState {
    pub progression: ProgressionState,
    pub active: Option<ActiveSession>,
    pub rng: StdRng,
}

/// Global application state.
pub struct AppState {
    pub repository: Arc<Mutex<SqliteRepository>>,
    pub dataset: DatasetProvider,
    pub config: AppConfig,
    pub practice: AsyncMutex<PracticeState>,
    pub conversation: AsyncMutex<Conversation>,
}

impl AppState {
    pub fn new(repository: SqliteRepository, dataset: DatasetProvider, config: AppConfig) -> Self {
        Self::with_rng(repository, dataset, config, StdRng::from_entropy())
    }

    /// State with a fixed shuffle seed (for tests).
    pub fn with_seed(
        repository: SqliteRepository,
        dataset: DatasetProvider,
        config: AppConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(repository, dataset, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        repository: SqliteRepository,
        dataset: DatasetProvider,
        config: AppConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            repository: Arc::new(Mutex::new(repository)),
            dataset,
            config,
            practice: AsyncMutex::new(PracticeState {
                progression: ProgressionState::new(),
                active: None,
                rng,
            }),
            conversation: AsyncMutex::new(Conversation::new()),
        }
    }

    pub fn repo(&self) -> Result<MutexGuard<'_, SqliteRepository>, CommandError> {
        self.repository
            .lock()
            .map_err(|_| CommandError::new("repository lock poisoned"))
    }
}
