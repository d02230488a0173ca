//! Level progression with a monotonic unlock ratchet.
//!
//! Each level runs short practice sessions. A session answered without a
//! single mistake unlocks the next level; anything less leaves the unlocked
//! level where it was so the learner can retry.

use crate::error::ProgressionError;
use crate::types::MAX_LEVEL;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status of a level from the learner's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LevelStatus {
    Locked,
    Available,
    Completed { perfect: bool },
}

/// Score of the current or last session of a level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelScore {
    pub current_score: u32,
    pub total_answered: u32,
    pub session_size: u32,
    /// Outcome of the last finished session, `Some(true)` when perfect.
    pub last_result: Option<bool>,
}

impl LevelScore {
    pub fn is_complete(&self) -> bool {
        self.session_size > 0 && self.total_answered >= self.session_size
    }

    pub fn is_perfect(&self) -> bool {
        self.is_complete() && self.current_score == self.session_size
    }
}

/// Per-learner progression across all levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    unlocked_level: u8,
    levels: BTreeMap<u8, LevelScore>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionState {
    /// Fresh learner: only level 1 is unlocked.
    pub fn new() -> Self {
        Self {
            unlocked_level: 1,
            levels: BTreeMap::new(),
        }
    }

    /// State resumed from a persisted unlocked level.
    pub fn with_unlocked(level: u8) -> Self {
        let mut state = Self::new();
        state.merge_unlocked(level);
        state
    }

    pub fn unlocked_level(&self) -> u8 {
        self.unlocked_level
    }

    pub fn score(&self, level: u8) -> Option<&LevelScore> {
        self.levels.get(&level)
    }

    /// Raise the unlocked level to `other` if higher. Never lowers it.
    pub fn merge_unlocked(&mut self, other: u8) -> u8 {
        self.unlocked_level = merge_levels(self.unlocked_level, other);
        self.unlocked_level
    }

    pub fn status(&self, level: u8) -> LevelStatus {
        if level == 0 || level > self.unlocked_level {
            return LevelStatus::Locked;
        }
        match self.levels.get(&level).and_then(|s| s.last_result) {
            Some(perfect) => LevelStatus::Completed { perfect },
            None => LevelStatus::Available,
        }
    }

    /// Status of every level, in order.
    pub fn statuses(&self) -> Vec<(u8, LevelStatus)> {
        (1..=MAX_LEVEL).map(|l| (l, self.status(l))).collect()
    }

    /// Start a new session of `size` questions on an unlocked level.
    ///
    /// Any unfinished session on that level is discarded.
    pub fn begin_session(&mut self, level: u8, size: usize) -> Result<(), ProgressionError> {
        check_range(level)?;
        if level > self.unlocked_level {
            return Err(ProgressionError::LevelLocked {
                level,
                unlocked: self.unlocked_level,
            });
        }
        if size == 0 {
            return Err(ProgressionError::EmptySession(level));
        }

        let score = self.levels.entry(level).or_default();
        score.current_score = 0;
        score.total_answered = 0;
        score.session_size = u32::try_from(size).unwrap_or(u32::MAX);
        Ok(())
    }

    /// Record one answer on the level's active session.
    ///
    /// Finishing a perfect session advances the unlocked level to
    /// `level + 1`, capped at [`MAX_LEVEL`].
    pub fn record_answer(&mut self, level: u8, correct: bool) -> Result<&LevelScore, ProgressionError> {
        check_range(level)?;
        let score = self
            .levels
            .get_mut(&level)
            .filter(|s| s.session_size > 0)
            .ok_or(ProgressionError::NoActiveSession(level))?;
        if score.is_complete() {
            return Err(ProgressionError::SessionComplete(level));
        }

        score.total_answered += 1;
        if correct {
            score.current_score += 1;
        }

        if score.is_complete() {
            let perfect = score.is_perfect();
            score.last_result = Some(perfect);
            if perfect {
                let next = level.saturating_add(1).min(MAX_LEVEL);
                self.unlocked_level = merge_levels(self.unlocked_level, next);
            }
        }

        Ok(&self.levels[&level])
    }
}

/// Merge two unlocked levels: the higher one wins, clamped to `1..=MAX_LEVEL`.
pub fn merge_levels(a: u8, b: u8) -> u8 {
    a.max(b).clamp(1, MAX_LEVEL)
}

fn check_range(level: u8) -> Result<(), ProgressionError> {
    if (1..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(ProgressionError::InvalidLevel(level))
    }
}
