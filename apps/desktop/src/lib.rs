pub mod assistant;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod db;
pub mod state;

use anyhow::Context;
use assistant::GlossaryBackend;
use commands::CommandError;
use config::AppConfig;
use dataset::DatasetProvider;
use db::SqliteRepository;
use state::AppState;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
commands:
  levels             show level status
  start <level>      start a practice session
  <answer>           answer the current exercise
  check <typed> <expected>
  stats | week       study statistics
  fav <word> | unfav <word> | favs
  ask <question>     ask the assistant
  quit";

/// Build the application state from `config`: open the database and load
/// the dataset and persisted progression.
pub async fn bootstrap(config: AppConfig) -> anyhow::Result<AppState> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    tracing::info!("Opening database at {}", config.db_path.display());
    let repository = SqliteRepository::open(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;

    let dataset = DatasetProvider::new(&config.dataset_path, config.dataset_timeout);
    let state = AppState::new(repository, dataset, config);

    state.dataset.load_dataset().await;
    commands::load_progression(&state).await?;
    Ok(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let state = bootstrap(config).await?;
    let backend = GlossaryBackend::new(state.dataset.get_all_entries());

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = dispatch(line, &state, &backend).await {
            println!("error: {}", e);
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}

async fn dispatch(
    line: &str,
    state: &AppState,
    backend: &GlossaryBackend,
) -> Result<(), CommandError> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim().to_string();

    match command {
        "help" => println!("{HELP}"),
        "levels" => {
            let view = commands::get_level_statuses(state).await?;
            for level in view.levels {
                println!("level {}: {:?}", level.level, level.status);
            }
        }
        "start" => {
            let level = rest
                .parse::<u8>()
                .map_err(|_| CommandError::new("usage: start <level>"))?;
            let started = commands::start_practice(level, state).await?;
            println!(
                "level {} ({}), {} exercises",
                started.level,
                started.tier.as_str(),
                started.total
            );
            print_exercise(&started.exercise);
        }
        "check" => {
            let (typed, expected) = rest
                .split_once(' ')
                .ok_or_else(|| CommandError::new("usage: check <typed> <expected>"))?;
            let result =
                commands::check_answer(typed.to_string(), expected.trim().to_string(), state)
                    .await?;
            println!(
                "{} ({}, similarity {:.3})",
                if result.is_correct { "accepted" } else { "rejected" },
                result.matched_by.as_str(),
                result.similarity
            );
        }
        "stats" => {
            let stats = commands::get_study_stats(state).await?;
            println!(
                "xp {} | sessions {} ({} perfect) | today {} | streak {} days | accuracy {:.0}%",
                stats.total_xp,
                stats.quizzes_taken,
                stats.perfect_quizzes,
                stats.quizzes_today,
                stats.streak_days,
                stats.accuracy * 100.0
            );
        }
        "week" => {
            let report = commands::get_weekly_report(state).await?;
            for day in &report.days {
                println!("{}  {:>3} xp  {}/{}", day.date, day.xp, day.correct, day.total);
            }
            println!("total {} xp over {} sessions", report.total_xp, report.quizzes);
        }
        "fav" => {
            commands::add_favorite(rest, state).await?;
        }
        "unfav" => {
            commands::remove_favorite(rest, state).await?;
        }
        "favs" => {
            for entry in commands::favorite_entries(state).await? {
                println!("{} - {}", entry.source_word, entry.english);
            }
        }
        "ask" => {
            let reply = commands::ask_assistant(rest, backend, state).await?;
            println!("{}", reply.text);
        }
        _ => {
            let response = commands::submit_answer(line.to_string(), state).await?;
            if response.outcome.validation.is_correct {
                println!("correct!");
            } else {
                println!("wrong, the answer was {}", response.outcome.correct_answer);
            }
            if let Some(exercise) = &response.next {
                print_exercise(exercise);
            }
            if let Some(summary) = &response.summary {
                println!(
                    "session over: {}/{}{} (+{} xp), unlocked level {}",
                    summary.correct,
                    summary.total,
                    if summary.perfect { " perfect" } else { "" },
                    response.xp_earned.unwrap_or(0),
                    summary.unlocked_level
                );
            }
        }
    }
    Ok(())
}

fn print_exercise(exercise: &bisaya_core::Exercise) {
    println!();
    println!("{}", exercise.masked_sentence);
    if let Some(translation) = &exercise.translation {
        println!("  ({})", translation);
    }
    println!("  options: {}", exercise.options.join(" / "));
}
