//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local SQLite database.
pub const SCHEMA: &str = r#"
-- Unlocked level per progression track (ratchet, only ever raised)
CREATE TABLE IF NOT EXISTS progression (
    track TEXT PRIMARY KEY,
    unlocked_level INTEGER NOT NULL DEFAULT 1,
    updated_at TEXT NOT NULL
);

-- Finished practice sessions
CREATE TABLE IF NOT EXISTS quiz_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL UNIQUE,
    track TEXT NOT NULL,
    level INTEGER NOT NULL,
    tier TEXT NOT NULL,
    correct INTEGER NOT NULL,
    total INTEGER NOT NULL,
    perfect INTEGER NOT NULL,
    xp_earned INTEGER NOT NULL,
    completed_at TEXT NOT NULL
);

-- Every submitted answer
CREATE TABLE IF NOT EXISTS answer_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    source_word TEXT NOT NULL,
    submitted TEXT NOT NULL,
    correct_answer TEXT NOT NULL,
    was_correct INTEGER NOT NULL,
    matched_by TEXT NOT NULL,
    similarity REAL NOT NULL,
    answered_at TEXT NOT NULL
);

-- Favorite words
CREATE TABLE IF NOT EXISTS favorites (
    source_word TEXT PRIMARY KEY COLLATE NOCASE,
    added_at TEXT NOT NULL
);

-- Practice settings
CREATE TABLE IF NOT EXISTS practice_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    similarity_threshold REAL NOT NULL DEFAULT 0.95,
    generator_affixes TEXT NOT NULL DEFAULT '["mo","nag","gi","mag","na"]',
    validator_affixes TEXT NOT NULL DEFAULT '["maka","nag","mag","mo","gi","na"]',
    max_options INTEGER NOT NULL DEFAULT 4,
    session_size INTEGER NOT NULL DEFAULT 10,
    xp_per_correct INTEGER NOT NULL DEFAULT 10,
    perfect_bonus_xp INTEGER NOT NULL DEFAULT 20
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_quiz_history_completed ON quiz_history(completed_at);
CREATE INDEX IF NOT EXISTS idx_quiz_history_track ON quiz_history(track);
CREATE INDEX IF NOT EXISTS idx_answer_log_session ON answer_log(session_id);
"#;

/// Initialize practice settings if not exists.
pub const INIT_PRACTICE_SETTINGS: &str = r#"
INSERT OR IGNORE INTO practice_settings (id) VALUES (1);
"#;
