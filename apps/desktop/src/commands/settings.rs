//! Settings commands.

use crate::db::SettingsRepository;
use crate::state::AppState;
use bisaya_core::PracticeSettings;

use super::CommandError;

/// Get practice settings.
pub async fn get_practice_settings(state: &AppState) -> Result<PracticeSettings, CommandError> {
    let repo = state.repo()?;
    repo.get_practice_settings().map_err(Into::into)
}

/// Save practice settings. Sessions already running keep their settings.
pub async fn save_practice_settings(
    settings: PracticeSettings,
    state: &AppState,
) -> Result<(), CommandError> {
    let repo = state.repo()?;
    repo.save_practice_settings(&settings)?;
    tracing::info!(
        threshold = settings.similarity_threshold,
        session_size = settings.session_size,
        "Saved practice settings"
    );
    Ok(())
}

/// Stored settings, or the defaults if they cannot be read.
pub(crate) fn settings_or_default(state: &AppState) -> PracticeSettings {
    match state.repo().and_then(|repo| Ok(repo.get_practice_settings()?)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Using default practice settings: {}", e);
            PracticeSettings::default()
        }
    }
}
