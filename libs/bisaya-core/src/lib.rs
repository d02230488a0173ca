//! Core Bisaya practice library shared by the app shell and its tests.
//!
//! Provides:
//! - CSV parser for the vocabulary dataset
//! - Fill-in-the-blank exercise generation (affix-aware word search, distractors)
//! - Answer validation (exact, base form, known variations, Levenshtein similarity)
//! - Level progression with a monotonic unlock ratchet
//! - Shared types (VocabularyEntry, Exercise, Tier, PracticeSettings, etc.)

pub mod error;
pub mod generator;
pub mod matching;
pub mod morphology;
pub mod parser;
pub mod progression;
pub mod session;
pub mod types;

pub use error::{ParseError, ProgressionError, Result};
pub use generator::{generate_exercise, ExerciseGenerator};
pub use matching::{
    levenshtein_distance, normalized_similarity, validate_answer, AnswerValidator, MatchKind,
    ValidationResult,
};
pub use parser::parse;
pub use progression::{merge_levels, LevelScore, LevelStatus, ProgressionState};
pub use session::{AnswerOutcome, PracticeSession, SessionSummary};
pub use types::{
    ExampleSentence, Exercise, PracticeSettings, Tier, VocabularyEntry, BLANK, MAX_LEVEL,
    MAX_OPTIONS, MAX_SESSION_SIZE,
};
