//! Application configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATASET_TIMEOUT_SECS: u64 = 5;
const DEFAULT_ASSISTANT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_TRACK: &str = "practice";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub db_path: PathBuf,
    pub dataset_timeout: Duration,
    pub assistant_timeout: Duration,
    /// Progression track the unlocked level is stored under.
    pub track: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("bisaya-dataset.csv"),
            db_path: default_db_path(),
            dataset_timeout: Duration::from_secs(DEFAULT_DATASET_TIMEOUT_SECS),
            assistant_timeout: Duration::from_secs(DEFAULT_ASSISTANT_TIMEOUT_SECS),
            track: DEFAULT_TRACK.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read `BISAYA_*` variables over the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Self {
            dataset_path: lookup("BISAYA_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            db_path: lookup("BISAYA_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            dataset_timeout: secs("BISAYA_DATASET_TIMEOUT_SECS", defaults.dataset_timeout),
            assistant_timeout: secs("BISAYA_ASSISTANT_TIMEOUT_SECS", defaults.assistant_timeout),
            track: lookup("BISAYA_TRACK")
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or(defaults.track),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bisaya-practice")
        .join("bisaya.db")
}
