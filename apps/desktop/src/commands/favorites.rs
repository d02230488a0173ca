//! Favorite word commands.

use crate::db::FavoritesRepository;
use crate::state::AppState;
use bisaya_core::VocabularyEntry;

use super::CommandError;

pub async fn add_favorite(source_word: String, state: &AppState) -> Result<bool, CommandError> {
    let word = source_word.trim();
    if word.is_empty() {
        return Err(CommandError::new("word must not be empty"));
    }
    let repo = state.repo()?;
    repo.add_favorite(word).map_err(Into::into)
}

pub async fn remove_favorite(source_word: String, state: &AppState) -> Result<bool, CommandError> {
    let repo = state.repo()?;
    repo.remove_favorite(&source_word).map_err(Into::into)
}

pub async fn list_favorites(state: &AppState) -> Result<Vec<String>, CommandError> {
    let repo = state.repo()?;
    repo.list_favorites().map_err(Into::into)
}

/// Dataset entries for the favorite words, in favorite order.
///
/// Favorites that are no longer in the dataset are skipped.
pub async fn favorite_entries(state: &AppState) -> Result<Vec<VocabularyEntry>, CommandError> {
    let words = list_favorites(state).await?;
    let snapshot = state.dataset.load_dataset().await;
    Ok(words
        .iter()
        .filter_map(|word| {
            snapshot
                .entries
                .iter()
                .find(|e| e.source_word.eq_ignore_ascii_case(word))
                .cloned()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::dataset::DatasetProvider;
    use crate::db::SqliteRepository;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        let entries = ["balay", "tubig"]
            .iter()
            .map(|w| VocabularyEntry {
                source_word: w.to_string(),
                ..Default::default()
            })
            .collect();
        AppState::with_seed(
            SqliteRepository::open_in_memory().unwrap(),
            DatasetProvider::preloaded(entries),
            AppConfig::default(),
            3,
        )
    }

    #[tokio::test]
    async fn favorites_resolve_to_entries() {
        let state = state();
        assert!(add_favorite("Tubig".to_string(), &state).await.unwrap());
        assert!(!add_favorite("tubig".to_string(), &state).await.unwrap());
        assert!(add_favorite("iro".to_string(), &state).await.unwrap());

        let entries = favorite_entries(&state).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_word, "tubig");

        assert!(remove_favorite("TUBIG".to_string(), &state).await.unwrap());
        assert_eq!(list_favorites(&state).await.unwrap(), vec!["iro".to_string()]);
    }

    #[tokio::test]
    async fn blank_word_rejected() {
        assert!(add_favorite("  ".to_string(), &state()).await.is_err());
    }
}
