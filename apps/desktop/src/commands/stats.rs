//! Statistics commands.

use crate::db::date_utils::today;
use crate::db::{HistoryRepository, QuizRecord, StatsRepository, StudyStats, WeeklyReport};
use crate::state::AppState;

use super::CommandError;

/// Get overall study statistics.
pub async fn get_study_stats(state: &AppState) -> Result<StudyStats, CommandError> {
    let repo = state.repo()?;
    repo.get_study_stats(today()).map_err(Into::into)
}

/// Get the report for the last seven days.
pub async fn get_weekly_report(state: &AppState) -> Result<WeeklyReport, CommandError> {
    let repo = state.repo()?;
    repo.get_weekly_report(today()).map_err(Into::into)
}

/// Get the most recent sessions on the configured track.
pub async fn get_recent_quizzes(
    limit: Option<usize>,
    state: &AppState,
) -> Result<Vec<QuizRecord>, CommandError> {
    let repo = state.repo()?;
    repo.recent_quizzes(&state.config.track, limit.unwrap_or(20))
        .map_err(Into::into)
}
