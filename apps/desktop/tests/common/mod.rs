//! Common test utilities for integration tests.

pub mod fixtures;

use std::path::PathBuf;
use std::time::Duration;

use bisaya_desktop_lib::config::AppConfig;
use bisaya_desktop_lib::state::AppState;
use tempfile::TempDir;

/// Temporary directory holding a dataset file and a database.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    /// Context with the sample dataset written to disk.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(dir.path().join("dataset.csv"), fixtures::sample_csv())
            .expect("failed to write dataset");
        Self { dir }
    }

    /// Context without a dataset file.
    pub fn without_dataset() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            dataset_path: self.dir.path().join("dataset.csv"),
            db_path: self.db_path(),
            dataset_timeout: Duration::from_secs(5),
            assistant_timeout: Duration::from_secs(1),
            track: "practice".to_string(),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("data").join("bisaya.db")
    }

    /// Open the app against this context, as a fresh process would.
    pub async fn boot(&self) -> AppState {
        bisaya_desktop_lib::bootstrap(self.config())
            .await
            .expect("bootstrap failed")
    }
}
