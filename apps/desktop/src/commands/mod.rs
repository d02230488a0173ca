//! Commands exposed to the front end.
//!
//! Each command takes the shared [`AppState`](crate::state::AppState) and
//! returns a serializable [`CommandError`] on failure.

pub mod assistant;
pub mod favorites;
pub mod progress;
pub mod settings;
pub mod stats;
pub mod study;
pub mod vocabulary;

pub use assistant::{ask_assistant, reset_conversation};
pub use favorites::{add_favorite, favorite_entries, list_favorites, remove_favorite};
pub use progress::{get_level_statuses, load_progression, ProgressView};
pub use settings::{get_practice_settings, save_practice_settings};
pub use stats::{get_recent_quizzes, get_study_stats, get_weekly_report};
pub use study::{
    abandon_practice, check_answer, current_exercise, start_practice, submit_answer,
    AnswerResponse, SessionStarted,
};
pub use vocabulary::{list_categories, list_vocabulary};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<bisaya_core::ProgressionError> for CommandError {
    fn from(e: bisaya_core::ProgressionError) -> Self {
        Self::new(e.to_string())
    }
}
