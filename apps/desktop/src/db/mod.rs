//! Local SQLite database operations.

pub mod date_utils;
pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{
    AnswerLogEntry, DailyActivity, FavoritesRepository, HistoryRepository, ProgressRepository,
    QuizRecord, SettingsRepository, SqliteRepository, StatsRepository, StudyStats, WeeklyReport,
};
