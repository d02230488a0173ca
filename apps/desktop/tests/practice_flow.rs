//! End-to-end practice flow against a real dataset file and database.

mod common;

use bisaya_core::{LevelStatus, MatchKind, Tier};
use bisaya_desktop_lib::commands;
use bisaya_desktop_lib::state::AppState;
use common::fixtures::VERBS;
use common::TestContext;
use pretty_assertions::assert_eq;

/// Answer every remaining exercise, using `answer` to pick the reply.
async fn play<F>(state: &AppState, mut answer: F) -> commands::AnswerResponse
where
    F: FnMut(usize, &bisaya_core::Exercise) -> String,
{
    let mut index = 0;
    let mut last = None;
    while let Some(exercise) = commands::current_exercise(state).await.unwrap() {
        let reply = answer(index, &exercise);
        last = Some(commands::submit_answer(reply, state).await.unwrap());
        index += 1;
    }
    last.expect("session had no exercises")
}

#[tokio::test]
async fn dataset_loads_from_disk() {
    let ctx = TestContext::new();
    let state = ctx.boot().await;

    let entries = commands::list_vocabulary(None, &state).await.unwrap();
    assert_eq!(entries.len(), VERBS.len());
    let kaon = &entries[0];
    assert_eq!(kaon.source_word, "kaon");
    assert_eq!(kaon.example(Tier::Beginner).bisaya, "Gusto ko mokaon, higala.");
    assert_eq!(
        kaon.example(Tier::Advanced).bisaya,
        "Gikaon na nila ang tanan, \"ingon niya\"."
    );
    assert_eq!(state.dataset.load_dataset().await.content_hash.len(), 64);
}

#[tokio::test]
async fn exercises_mask_affixed_forms() {
    let ctx = TestContext::new();
    let state = ctx.boot().await;

    let started = commands::start_practice(1, &state).await.unwrap();
    assert_eq!(started.total, VERBS.len());
    let exercise = started.exercise;
    assert!(exercise.correct_answer.starts_with("mo"));
    assert!(exercise.masked_sentence.contains("_____"));
    assert!(!exercise.masked_sentence.contains(&exercise.correct_answer));
    assert_eq!(exercise.options.len(), 4);
    assert_eq!(
        exercise
            .options
            .iter()
            .filter(|o| **o == exercise.correct_answer)
            .count(),
        1
    );
    assert!(exercise.translation.is_some());
}

#[tokio::test]
async fn perfect_session_survives_restart() {
    let ctx = TestContext::new();
    {
        let state = ctx.boot().await;
        commands::start_practice(1, &state).await.unwrap();
        let last = play(&state, |_, e| e.correct_answer.clone()).await;
        let summary = last.summary.unwrap();
        assert!(summary.perfect);
        assert_eq!(summary.unlocked_level, 2);
    }

    let state = ctx.boot().await;
    let view = commands::get_level_statuses(&state).await.unwrap();
    assert_eq!(view.unlocked_level, 2);
    assert_eq!(view.levels[1].status, LevelStatus::Available);
    assert_eq!(view.levels[2].status, LevelStatus::Locked);

    let stats = commands::get_study_stats(&state).await.unwrap();
    assert_eq!(stats.quizzes_taken, 1);
    assert_eq!(stats.perfect_quizzes, 1);
    assert_eq!(stats.streak_days, 1);
    assert_eq!(stats.total_xp, 5 * 10 + 20);
}

#[tokio::test]
async fn base_form_answers_count_as_correct() {
    let ctx = TestContext::new();
    let state = ctx.boot().await;
    commands::start_practice(1, &state).await.unwrap();

    let last = play(&state, |_, e| e.source_word.clone()).await;
    assert_eq!(last.outcome.validation.matched_by, MatchKind::BaseForm);
    assert!(last.summary.unwrap().perfect);
}

#[tokio::test]
async fn mistake_keeps_level_and_allows_retry() {
    let ctx = TestContext::new();
    let state = ctx.boot().await;
    commands::start_practice(1, &state).await.unwrap();

    let last = play(&state, |i, e| {
        if i == 0 {
            "dili".to_string()
        } else {
            e.correct_answer.clone()
        }
    })
    .await;
    let summary = last.summary.unwrap();
    assert!(!summary.perfect);
    assert_eq!(summary.unlocked_level, 1);
    assert_eq!(last.xp_earned, Some(40));

    let view = commands::get_level_statuses(&state).await.unwrap();
    assert_eq!(view.levels[0].status, LevelStatus::Completed { perfect: false });
    assert!(commands::start_practice(2, &state).await.is_err());
    assert!(commands::start_practice(1, &state).await.is_ok());

    let report = commands::get_weekly_report(&state).await.unwrap();
    assert_eq!(report.days.len(), 7);
    assert_eq!(report.quizzes, 1);
    assert_eq!(report.days[6].correct, 4);
}

#[tokio::test]
async fn missing_dataset_degrades_to_empty() {
    let ctx = TestContext::without_dataset();
    let state = ctx.boot().await;

    assert!(commands::list_vocabulary(None, &state).await.unwrap().is_empty());
    assert!(commands::start_practice(1, &state).await.is_err());
    assert_eq!(
        commands::get_study_stats(&state).await.unwrap().quizzes_taken,
        0
    );
    assert!(ctx.db_path().exists());
}
