//! Progression commands.

use crate::db::ProgressRepository;
use crate::state::AppState;
use bisaya_core::{LevelStatus, MAX_LEVEL};

use super::CommandError;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LevelView {
    pub level: u8,
    #[serde(flatten)]
    pub status: LevelStatus,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProgressView {
    pub track: String,
    pub unlocked_level: u8,
    pub max_level: u8,
    pub levels: Vec<LevelView>,
}

/// Merge the persisted unlocked level into memory.
///
/// A storage failure is logged and the in-memory level (1 on a fresh start)
/// is kept.
pub async fn load_progression(state: &AppState) -> Result<ProgressView, CommandError> {
    let persisted = match read_persisted(state) {
        Ok(level) => level,
        Err(e) => {
            tracing::warn!(track = %state.config.track, "Could not load progression: {}", e);
            None
        }
    };

    let mut practice = state.practice.lock().await;
    if let Some(level) = persisted {
        let unlocked = practice.progression.merge_unlocked(level);
        tracing::debug!(persisted = level, unlocked, "Merged persisted progression");
    }
    Ok(view(state, &practice.progression))
}

/// Status of every level as currently held in memory.
pub async fn get_level_statuses(state: &AppState) -> Result<ProgressView, CommandError> {
    let practice = state.practice.lock().await;
    Ok(view(state, &practice.progression))
}

fn read_persisted(state: &AppState) -> Result<Option<u8>, CommandError> {
    let repo = state.repo()?;
    Ok(repo.get_unlocked_level(&state.config.track)?)
}

fn view(state: &AppState, progression: &bisaya_core::ProgressionState) -> ProgressView {
    ProgressView {
        track: state.config.track.clone(),
        unlocked_level: progression.unlocked_level(),
        max_level: MAX_LEVEL,
        levels: progression
            .statuses()
            .into_iter()
            .map(|(level, status)| LevelView { level, status })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::dataset::DatasetProvider;
    use crate::db::SqliteRepository;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::with_seed(
            SqliteRepository::open_in_memory().unwrap(),
            DatasetProvider::preloaded(Vec::new()),
            AppConfig::default(),
            7,
        )
    }

    #[tokio::test]
    async fn fresh_learner_starts_at_level_one() {
        let view = load_progression(&state()).await.unwrap();
        assert_eq!(view.unlocked_level, 1);
        assert_eq!(view.levels.len(), 6);
        assert_eq!(view.levels[0].status, LevelStatus::Available);
        assert_eq!(view.levels[1].status, LevelStatus::Locked);
    }

    #[tokio::test]
    async fn persisted_level_is_merged() {
        let state = state();
        state
            .repo()
            .unwrap()
            .raise_unlocked_level("practice", 3)
            .unwrap();
        let view = load_progression(&state).await.unwrap();
        assert_eq!(view.unlocked_level, 3);
        assert_eq!(view.levels[2].status, LevelStatus::Available);
    }

    #[tokio::test]
    async fn in_memory_level_wins_when_higher() {
        let state = state();
        state.practice.lock().await.progression.merge_unlocked(4);
        state
            .repo()
            .unwrap()
            .raise_unlocked_level("practice", 2)
            .unwrap();
        assert_eq!(load_progression(&state).await.unwrap().unlocked_level, 4);
    }

    #[tokio::test]
    async fn storage_failure_falls_back_to_level_one() {
        let state = state();
        let repo = std::sync::Arc::clone(&state.repository);
        let _ = std::thread::spawn(move || {
            let _guard = repo.lock().unwrap();
            panic!("poison the repository lock");
        })
        .join();

        let view = load_progression(&state).await.unwrap();
        assert_eq!(view.unlocked_level, 1);
    }
}
