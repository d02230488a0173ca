//! Practice sessions: a shuffled run of exercises for one level.

use crate::error::ProgressionError;
use crate::generator::ExerciseGenerator;
use crate::matching::{AnswerValidator, ValidationResult};
use crate::progression::{LevelScore, ProgressionState};
use crate::types::{Exercise, Tier, MAX_SESSION_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of a single submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub validation: ValidationResult,
    pub correct_answer: String,
    pub score: LevelScore,
    pub finished: bool,
    pub unlocked_level: u8,
}

/// Final tally of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub level: u8,
    pub tier: Tier,
    pub correct: u32,
    pub total: u32,
    pub perfect: bool,
    pub unlocked_level: u8,
}

/// An in-progress practice session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSession {
    level: u8,
    tier: Tier,
    exercises: Vec<Exercise>,
    answered: usize,
    correct: u32,
}

impl PracticeSession {
    /// Build a session for `level`: every exercise the dataset yields for the
    /// level's tier, shuffled, cut to `size` (at most [`MAX_SESSION_SIZE`]).
    pub fn start<R: Rng + ?Sized>(
        generator: &ExerciseGenerator<'_>,
        state: &mut ProgressionState,
        level: u8,
        size: usize,
        rng: &mut R,
    ) -> Result<Self, ProgressionError> {
        let tier = Tier::for_level(level).ok_or(ProgressionError::InvalidLevel(level))?;
        if level > state.unlocked_level() {
            return Err(ProgressionError::LevelLocked {
                level,
                unlocked: state.unlocked_level(),
            });
        }

        let mut exercises = generator.generate_all(tier, rng);
        exercises.shuffle(rng);
        exercises.truncate(size.min(MAX_SESSION_SIZE));

        state.begin_session(level, exercises.len())?;

        Ok(Self {
            level,
            tier,
            exercises,
            answered: 0,
            correct: 0,
        })
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Exercise awaiting an answer, if any remain.
    pub fn current(&self) -> Option<&Exercise> {
        self.exercises.get(self.answered)
    }

    pub fn is_finished(&self) -> bool {
        self.answered >= self.exercises.len()
    }

    /// Validate `answer` against the current exercise and record it.
    pub fn submit(
        &mut self,
        state: &mut ProgressionState,
        validator: &AnswerValidator,
        answer: &str,
    ) -> Result<AnswerOutcome, ProgressionError> {
        let exercise = self
            .current()
            .ok_or(ProgressionError::SessionComplete(self.level))?;
        let correct_answer = exercise.correct_answer.clone();
        let validation = validator.compare(answer, &correct_answer);

        let score = state.record_answer(self.level, validation.is_correct)?.clone();
        self.answered += 1;
        if validation.is_correct {
            self.correct += 1;
        }

        Ok(AnswerOutcome {
            validation,
            correct_answer,
            score,
            finished: self.is_finished(),
            unlocked_level: state.unlocked_level(),
        })
    }

    /// Summary once every exercise has been answered.
    pub fn summary(&self, state: &ProgressionState) -> Option<SessionSummary> {
        if !self.is_finished() {
            return None;
        }
        let total = u32::try_from(self.exercises.len()).unwrap_or(u32::MAX);
        Some(SessionSummary {
            level: self.level,
            tier: self.tier,
            correct: self.correct,
            total,
            perfect: self.correct == total,
            unlocked_level: state.unlocked_level(),
        })
    }
}
