//! Repository pattern for database access.

use crate::db::date_utils::{date_string, streak_length, trailing_days};
use crate::db::error::DbError;
use bisaya_core::types::{PracticeSettings, Tier, MAX_LEVEL, MAX_OPTIONS, MAX_SESSION_SIZE};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for the unlocked-level ratchet.
pub trait ProgressRepository {
    fn get_unlocked_level(&self, track: &str) -> Result<Option<u8>>;
    /// Raise the stored level to `level` if higher; returns the stored value.
    fn raise_unlocked_level(&self, track: &str, level: u8) -> Result<u8>;
}

/// Repository for finished sessions and individual answers.
pub trait HistoryRepository {
    fn insert_quiz_result(&self, record: &QuizRecord) -> Result<i64>;
    fn insert_answer(&self, entry: &AnswerLogEntry) -> Result<i64>;
    fn recent_quizzes(&self, track: &str, limit: usize) -> Result<Vec<QuizRecord>>;
}

/// Repository for favorite words.
pub trait FavoritesRepository {
    /// Returns false if the word was already a favorite.
    fn add_favorite(&self, source_word: &str) -> Result<bool>;
    /// Returns false if the word was not a favorite.
    fn remove_favorite(&self, source_word: &str) -> Result<bool>;
    fn is_favorite(&self, source_word: &str) -> Result<bool>;
    fn list_favorites(&self) -> Result<Vec<String>>;
}

/// Repository for settings operations.
pub trait SettingsRepository {
    fn get_practice_settings(&self) -> Result<PracticeSettings>;
    fn save_practice_settings(&self, settings: &PracticeSettings) -> Result<()>;
}

/// Repository for statistics operations.
pub trait StatsRepository {
    fn get_study_stats(&self, today: NaiveDate) -> Result<StudyStats>;
    fn get_weekly_report(&self, today: NaiveDate) -> Result<WeeklyReport>;
}

/// A finished practice session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuizRecord {
    pub session_id: String,
    pub track: String,
    pub level: u8,
    pub tier: Tier,
    pub correct: u32,
    pub total: u32,
    pub perfect: bool,
    pub xp_earned: u32,
    pub completed_at: DateTime<Utc>,
}

/// One submitted answer.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerLogEntry {
    pub session_id: String,
    pub source_word: String,
    pub submitted: String,
    pub correct_answer: String,
    pub was_correct: bool,
    pub matched_by: String,
    pub similarity: f64,
    pub answered_at: DateTime<Utc>,
}

/// Overall study statistics.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StudyStats {
    pub total_xp: u64,
    pub quizzes_taken: usize,
    pub perfect_quizzes: usize,
    pub quizzes_today: usize,
    pub streak_days: usize,
    pub accuracy: f64,
}

/// Activity on one day.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DailyActivity {
    pub date: String,
    pub quizzes: usize,
    pub correct: u32,
    pub total: u32,
    pub xp: u32,
}

/// Seven-day progress report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeeklyReport {
    /// Oldest day first.
    pub days: Vec<DailyActivity>,
    pub total_xp: u32,
    pub quizzes: usize,
    pub accuracy: f64,
    pub best_day: Option<String>,
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_PRACTICE_SETTINGS)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn row_to_quiz(row: &rusqlite::Row) -> rusqlite::Result<QuizRow> {
        Ok(QuizRow {
            session_id: row.get(0)?,
            track: row.get(1)?,
            level: row.get(2)?,
            tier: row.get(3)?,
            correct: row.get(4)?,
            total: row.get(5)?,
            perfect: row.get(6)?,
            xp_earned: row.get(7)?,
            completed_at: row.get(8)?,
        })
    }
}

/// Raw `quiz_history` row before tier and timestamp are decoded.
struct QuizRow {
    session_id: String,
    track: String,
    level: u8,
    tier: String,
    correct: u32,
    total: u32,
    perfect: bool,
    xp_earned: u32,
    completed_at: String,
}

impl QuizRow {
    fn into_record(self) -> Result<QuizRecord> {
        Ok(QuizRecord {
            tier: parse_tier(&self.tier)?,
            completed_at: parse_timestamp(&self.completed_at)?,
            session_id: self.session_id,
            track: self.track,
            level: self.level,
            correct: self.correct,
            total: self.total,
            perfect: self.perfect,
            xp_earned: self.xp_earned,
        })
    }
}

fn parse_tier(value: &str) -> Result<Tier> {
    match value {
        "beginner" => Ok(Tier::Beginner),
        "intermediate" => Ok(Tier::Intermediate),
        "advanced" => Ok(Tier::Advanced),
        other => Err(DbError::InvalidData(format!("unknown tier: {other}"))),
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData(format!("bad timestamp {value}: {e}")))
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ProgressRepository for SqliteRepository {
    fn get_unlocked_level(&self, track: &str) -> Result<Option<u8>> {
        let stored: Option<i64> = self
            .conn
            .query_row(
                "SELECT unlocked_level FROM progression WHERE track = ?1",
                params![track],
                |row| row.get(0),
            )
            .optional()?;

        // Rows written elsewhere may hold any integer; keep them in range.
        Ok(stored.map(|level| level.clamp(1, i64::from(MAX_LEVEL)) as u8))
    }

    fn raise_unlocked_level(&self, track: &str, level: u8) -> Result<u8> {
        let level = level.clamp(1, MAX_LEVEL);
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO progression (track, unlocked_level, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(track) DO UPDATE SET
                unlocked_level = MAX(unlocked_level, excluded.unlocked_level),
                updated_at = excluded.updated_at",
            params![track, level, now],
        )?;

        self.get_unlocked_level(track)?
            .ok_or_else(|| DbError::InvalidData(format!("progression row missing for {track}")))
    }
}

impl HistoryRepository for SqliteRepository {
    fn insert_quiz_result(&self, record: &QuizRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO quiz_history (session_id, track, level, tier, correct, total, perfect,
                xp_earned, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.session_id,
                record.track,
                record.level,
                record.tier.as_str(),
                record.correct,
                record.total,
                record.perfect,
                record.xp_earned,
                record.completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_answer(&self, entry: &AnswerLogEntry) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO answer_log (session_id, source_word, submitted, correct_answer,
                was_correct, matched_by, similarity, answered_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entry.session_id,
                entry.source_word,
                entry.submitted,
                entry.correct_answer,
                entry.was_correct,
                entry.matched_by,
                entry.similarity,
                entry.answered_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn recent_quizzes(&self, track: &str, limit: usize) -> Result<Vec<QuizRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT session_id, track, level, tier, correct, total, perfect, xp_earned, completed_at
             FROM quiz_history
             WHERE track = ?1
             ORDER BY completed_at DESC, id DESC
             LIMIT ?2",
        )?;

        let rows = stmt
            .query_map(params![track, limit], Self::row_to_quiz)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(QuizRow::into_record).collect()
    }
}

impl FavoritesRepository for SqliteRepository {
    fn add_favorite(&self, source_word: &str) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let count = self.conn.execute(
            "INSERT OR IGNORE INTO favorites (source_word, added_at) VALUES (?1, ?2)",
            params![source_word.trim(), now],
        )?;
        Ok(count > 0)
    }

    fn remove_favorite(&self, source_word: &str) -> Result<bool> {
        let count = self.conn.execute(
            "DELETE FROM favorites WHERE source_word = ?1",
            params![source_word.trim()],
        )?;
        Ok(count > 0)
    }

    fn is_favorite(&self, source_word: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM favorites WHERE source_word = ?1",
                params![source_word.trim()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn list_favorites(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT source_word FROM favorites ORDER BY added_at, source_word")?;
        let words = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(words)
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_practice_settings(&self) -> Result<PracticeSettings> {
        let (threshold, generator, validator, max_options, session_size, xp, bonus) =
            self.conn.query_row(
                "SELECT similarity_threshold, generator_affixes, validator_affixes, max_options,
                    session_size, xp_per_correct, perfect_bonus_xp
                 FROM practice_settings WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, f64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, usize>(3)?,
                        row.get::<_, usize>(4)?,
                        row.get::<_, u32>(5)?,
                        row.get::<_, u32>(6)?,
                    ))
                },
            )?;

        Ok(PracticeSettings {
            similarity_threshold: threshold,
            generator_affixes: serde_json::from_str(&generator)?,
            validator_affixes: serde_json::from_str(&validator)?,
            max_options,
            session_size,
            xp_per_correct: xp,
            perfect_bonus_xp: bonus,
        })
    }

    fn save_practice_settings(&self, settings: &PracticeSettings) -> Result<()> {
        if !(0.0..=1.0).contains(&settings.similarity_threshold) {
            return Err(DbError::InvalidData(format!(
                "similarity threshold {} outside 0.0-1.0",
                settings.similarity_threshold
            )));
        }
        if !(2..=MAX_OPTIONS).contains(&settings.max_options) {
            return Err(DbError::InvalidData(format!(
                "max_options {} outside 2-{}",
                settings.max_options, MAX_OPTIONS
            )));
        }
        if !(1..=MAX_SESSION_SIZE).contains(&settings.session_size) {
            return Err(DbError::InvalidData(format!(
                "session_size {} outside 1-{}",
                settings.session_size, MAX_SESSION_SIZE
            )));
        }

        self.conn.execute(
            "UPDATE practice_settings SET
                similarity_threshold = ?1,
                generator_affixes = ?2,
                validator_affixes = ?3,
                max_options = ?4,
                session_size = ?5,
                xp_per_correct = ?6,
                perfect_bonus_xp = ?7
             WHERE id = 1",
            params![
                settings.similarity_threshold,
                serde_json::to_string(&settings.generator_affixes)?,
                serde_json::to_string(&settings.validator_affixes)?,
                settings.max_options,
                settings.session_size,
                settings.xp_per_correct,
                settings.perfect_bonus_xp,
            ],
        )?;
        Ok(())
    }
}

impl StatsRepository for SqliteRepository {
    fn get_study_stats(&self, today: NaiveDate) -> Result<StudyStats> {
        let (quizzes_taken, perfect_quizzes, total_xp, correct, total) = self.conn.query_row(
            "SELECT
                COUNT(*),
                COALESCE(SUM(perfect), 0),
                COALESCE(SUM(xp_earned), 0),
                COALESCE(SUM(correct), 0),
                COALESCE(SUM(total), 0)
             FROM quiz_history",
            [],
            |row| {
                Ok((
                    row.get::<_, usize>(0)?,
                    row.get::<_, usize>(1)?,
                    row.get::<_, u64>(2)?,
                    row.get::<_, u64>(3)?,
                    row.get::<_, u64>(4)?,
                ))
            },
        )?;

        let quizzes_today: usize = self.conn.query_row(
            "SELECT COUNT(*) FROM quiz_history WHERE date(completed_at) = ?1",
            params![date_string(today)],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT date(completed_at) AS day FROM quiz_history ORDER BY day DESC",
        )?;
        let active_days = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
            .collect::<Vec<_>>();

        Ok(StudyStats {
            total_xp,
            quizzes_taken,
            perfect_quizzes,
            quizzes_today,
            streak_days: streak_length(&active_days, today),
            accuracy: ratio(correct, total),
        })
    }

    fn get_weekly_report(&self, today: NaiveDate) -> Result<WeeklyReport> {
        let mut stmt = self.conn.prepare(
            "SELECT COUNT(*), COALESCE(SUM(correct), 0), COALESCE(SUM(total), 0),
                COALESCE(SUM(xp_earned), 0)
             FROM quiz_history WHERE date(completed_at) = ?1",
        )?;

        let mut days = Vec::with_capacity(7);
        for date in trailing_days(today, 7) {
            let date = date_string(date);
            let (quizzes, correct, total, xp) = stmt.query_row(params![date], |row| {
                Ok((
                    row.get::<_, usize>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                ))
            })?;
            days.push(DailyActivity {
                date,
                quizzes,
                correct,
                total,
                xp,
            });
        }

        let total_xp = days.iter().map(|d| d.xp).sum();
        let quizzes = days.iter().map(|d| d.quizzes).sum();
        let correct: u64 = days.iter().map(|d| u64::from(d.correct)).sum();
        let total: u64 = days.iter().map(|d| u64::from(d.total)).sum();
        let best_day = days
            .iter()
            .filter(|d| d.xp > 0)
            .max_by_key(|d| d.xp)
            .map(|d| d.date.clone());

        Ok(WeeklyReport {
            days,
            total_xp,
            quizzes,
            accuracy: ratio(correct, total),
            best_day,
        })
    }
}
