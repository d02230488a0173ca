//! Practice session commands.

use crate::db::{AnswerLogEntry, HistoryRepository, ProgressRepository, QuizRecord};
use crate::state::{ActiveSession, AppState};
use bisaya_core::{
    AnswerOutcome, AnswerValidator, Exercise, ExerciseGenerator, PracticeSession,
    PracticeSettings, SessionSummary, Tier, ValidationResult,
};
use chrono::Utc;
use uuid::Uuid;

use super::settings::settings_or_default;
use super::CommandError;

#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionStarted {
    pub session_id: String,
    pub level: u8,
    pub tier: Tier,
    pub total: usize,
    pub exercise: Exercise,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AnswerResponse {
    #[serde(flatten)]
    pub outcome: AnswerOutcome,
    /// The following exercise, `None` once the session is over.
    pub next: Option<Exercise>,
    pub summary: Option<SessionSummary>,
    pub xp_earned: Option<u32>,
}

/// Start a practice session on `level`, replacing any unfinished one.
pub async fn start_practice(level: u8, state: &AppState) -> Result<SessionStarted, CommandError> {
    let snapshot = state.dataset.load_dataset().await;
    let settings = settings_or_default(state);
    let generator = ExerciseGenerator::new(&snapshot.entries, &settings);

    let mut practice = state.practice.lock().await;
    let practice = &mut *practice;
    let session = PracticeSession::start(
        &generator,
        &mut practice.progression,
        level,
        settings.session_size,
        &mut practice.rng,
    )?;

    let exercise = session
        .current()
        .cloned()
        .ok_or_else(|| CommandError::new("session has no exercises"))?;
    let id = Uuid::new_v4();
    tracing::info!(
        session_id = %id,
        level,
        tier = session.tier().as_str(),
        exercises = session.len(),
        "Started practice session"
    );

    let started = SessionStarted {
        session_id: id.to_string(),
        level,
        tier: session.tier(),
        total: session.len(),
        exercise,
    };
    if let Some(previous) = practice.active.replace(ActiveSession {
        id,
        session,
        settings,
    }) {
        tracing::debug!(session_id = %previous.id, "Replaced unfinished session");
    }
    Ok(started)
}

/// Exercise awaiting an answer in the active session.
pub async fn current_exercise(state: &AppState) -> Result<Option<Exercise>, CommandError> {
    let practice = state.practice.lock().await;
    Ok(practice
        .active
        .as_ref()
        .and_then(|a| a.session.current().cloned()))
}

/// Submit an answer for the current exercise.
///
/// The answer is logged. When it finishes the session the result is written
/// to history and the unlocked level is persisted. Storage failures are
/// logged and do not fail the command.
pub async fn submit_answer(answer: String, state: &AppState) -> Result<AnswerResponse, CommandError> {
    let mut practice = state.practice.lock().await;
    let practice = &mut *practice;
    let active = practice
        .active
        .as_mut()
        .ok_or_else(|| CommandError::new("no practice session in progress"))?;

    let source_word = active
        .session
        .current()
        .map(|e| e.source_word.clone())
        .unwrap_or_default();
    let validator = AnswerValidator::new(&active.settings);
    let outcome = active
        .session
        .submit(&mut practice.progression, &validator, &answer)?;

    let session_id = active.id.to_string();
    log_answer(state, &session_id, &source_word, &answer, &outcome);

    let next = active.session.current().cloned();
    let mut summary = active.session.summary(&practice.progression);
    let mut xp_earned = None;

    if let Some(finished) = summary.as_mut() {
        let xp = session_xp(finished, &active.settings);
        xp_earned = Some(xp);
        let persisted = persist_finished(state, &session_id, finished, xp);
        if let Some(level) = persisted {
            finished.unlocked_level = practice.progression.merge_unlocked(level);
        }
        tracing::info!(
            session_id = %session_id,
            level = finished.level,
            correct = finished.correct,
            total = finished.total,
            perfect = finished.perfect,
            unlocked = finished.unlocked_level,
            "Finished practice session"
        );
        practice.active = None;
    }

    Ok(AnswerResponse {
        outcome,
        next,
        summary,
        xp_earned,
    })
}

/// Drop the active session without recording a result.
pub async fn abandon_practice(state: &AppState) -> Result<bool, CommandError> {
    let mut practice = state.practice.lock().await;
    Ok(match practice.active.take() {
        Some(active) => {
            tracing::info!(session_id = %active.id, "Abandoned practice session");
            true
        }
        None => false,
    })
}

/// Compare a typed answer with the expected one using the stored settings.
pub async fn check_answer(
    typed_answer: String,
    correct_answer: String,
    state: &AppState,
) -> Result<ValidationResult, CommandError> {
    let validator = AnswerValidator::new(&settings_or_default(state));
    Ok(validator.compare(&typed_answer, &correct_answer))
}

fn session_xp(summary: &SessionSummary, settings: &PracticeSettings) -> u32 {
    let base = summary.correct.saturating_mul(settings.xp_per_correct);
    if summary.perfect {
        base.saturating_add(settings.perfect_bonus_xp)
    } else {
        base
    }
}

fn log_answer(
    state: &AppState,
    session_id: &str,
    source_word: &str,
    submitted: &str,
    outcome: &AnswerOutcome,
) {
    let entry = AnswerLogEntry {
        session_id: session_id.to_string(),
        source_word: source_word.to_string(),
        submitted: submitted.to_string(),
        correct_answer: outcome.correct_answer.clone(),
        was_correct: outcome.validation.is_correct,
        matched_by: outcome.validation.matched_by.as_str().to_string(),
        similarity: outcome.validation.similarity,
        answered_at: Utc::now(),
    };
    let result = state
        .repo()
        .and_then(|repo| Ok(repo.insert_answer(&entry)?));
    if let Err(e) = result {
        tracing::warn!(session_id, "Failed to log answer: {}", e);
    }
}

/// Write the finished session. Returns the stored unlocked level.
fn persist_finished(
    state: &AppState,
    session_id: &str,
    summary: &SessionSummary,
    xp_earned: u32,
) -> Option<u8> {
    let record = QuizRecord {
        session_id: session_id.to_string(),
        track: state.config.track.clone(),
        level: summary.level,
        tier: summary.tier,
        correct: summary.correct,
        total: summary.total,
        perfect: summary.perfect,
        xp_earned,
        completed_at: Utc::now(),
    };

    let result = state.repo().and_then(|repo| {
        repo.insert_quiz_result(&record)?;
        Ok(repo.raise_unlocked_level(&record.track, summary.unlocked_level)?)
    });
    match result {
        Ok(level) => Some(level),
        Err(e) => {
            tracing::warn!(session_id, "Failed to save session result: {}", e);
            None
        }
    }
}
