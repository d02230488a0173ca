//! Error types for bisaya-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing the vocabulary dataset.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing header row")]
    MissingHeader,

    #[error("expected {expected} columns at line {line}, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unterminated quoted field starting at line {line}")]
    UnterminatedQuote { line: usize },

    #[error("unexpected character after closing quote at line {line}")]
    StrayQuote { line: usize },
}

/// Errors raised by the progression tracker on invalid use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("level {0} is out of range (1-{max})", max = crate::types::MAX_LEVEL)]
    InvalidLevel(u8),

    #[error("level {level} is locked (unlocked up to {unlocked})")]
    LevelLocked { level: u8, unlocked: u8 },

    #[error("no active session for level {0}")]
    NoActiveSession(u8),

    #[error("session for level {0} is already complete")]
    SessionComplete(u8),

    #[error("session for level {0} has no exercises")]
    EmptySession(u8),
}
