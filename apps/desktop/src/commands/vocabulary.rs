//! Vocabulary browsing commands.

use crate::state::AppState;
use bisaya_core::VocabularyEntry;
use std::collections::BTreeSet;

use super::CommandError;

/// All entries, optionally restricted to one category (case-insensitive).
pub async fn list_vocabulary(
    category: Option<String>,
    state: &AppState,
) -> Result<Vec<VocabularyEntry>, CommandError> {
    let snapshot = state.dataset.load_dataset().await;
    let entries = match category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => snapshot
            .entries
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect(),
        _ => snapshot.entries.clone(),
    };
    Ok(entries)
}

/// Distinct categories, sorted.
pub async fn list_categories(state: &AppState) -> Result<Vec<String>, CommandError> {
    let snapshot = state.dataset.load_dataset().await;
    let categories: BTreeSet<&str> = snapshot
        .entries
        .iter()
        .map(|e| e.category.as_str())
        .collect();
    Ok(categories.into_iter().map(String::from).collect())
}
