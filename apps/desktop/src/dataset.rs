//! Vocabulary dataset loading.
//!
//! The CSV is read once per provider under a timeout. A failed or slow load
//! leaves the app running on an empty dataset.

use bisaya_core::types::VocabularyEntry;
use bisaya_core::ParseError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] ParseError),

    #[error("dataset load timed out after {0:?}")]
    Timeout(Duration),
}

/// An immutable, loaded copy of the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSnapshot {
    pub entries: Vec<VocabularyEntry>,
    /// SHA-256 of the source file, empty when nothing was loaded.
    pub content_hash: String,
}

impl DatasetSnapshot {
    pub fn from_content(content: &str) -> Result<Self, DatasetError> {
        Ok(Self {
            entries: bisaya_core::parse(content)?,
            content_hash: hash_content(content),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads the dataset at most once and hands out the cached snapshot.
#[derive(Debug)]
pub struct DatasetProvider {
    path: PathBuf,
    timeout: Duration,
    snapshot: OnceCell<Arc<DatasetSnapshot>>,
}

impl DatasetProvider {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
            snapshot: OnceCell::new(),
        }
    }

    /// Provider that is already loaded with `entries`.
    pub fn preloaded(entries: Vec<VocabularyEntry>) -> Self {
        let snapshot = Arc::new(DatasetSnapshot {
            entries,
            content_hash: String::new(),
        });
        Self {
            path: PathBuf::new(),
            timeout: Duration::ZERO,
            snapshot: OnceCell::new_with(Some(snapshot)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.initialized()
    }

    /// Load the dataset. Later calls return the cached snapshot.
    pub async fn load_dataset(&self) -> Arc<DatasetSnapshot> {
        self.snapshot
            .get_or_init(|| async {
                match self.try_load().await {
                    Ok(snapshot) => {
                        tracing::info!(
                            entries = snapshot.entries.len(),
                            hash = %snapshot.content_hash,
                            "Loaded vocabulary dataset"
                        );
                        Arc::new(snapshot)
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %self.path.display(),
                            "Dataset unavailable, continuing with no entries: {}",
                            e
                        );
                        Arc::new(DatasetSnapshot::default())
                    }
                }
            })
            .await
            .clone()
    }

    /// Entries of the loaded snapshot; empty before the first load.
    pub fn get_all_entries(&self) -> Vec<VocabularyEntry> {
        self.snapshot
            .get()
            .map(|s| s.entries.clone())
            .unwrap_or_default()
    }

    async fn try_load(&self) -> Result<DatasetSnapshot, DatasetError> {
        let read = tokio::fs::read_to_string(&self.path);
        let content = tokio::time::timeout(self.timeout, read)
            .await
            .map_err(|_| DatasetError::Timeout(self.timeout))?
            .map_err(|source| DatasetError::Io {
                path: self.path.clone(),
                source,
            })?;
        DatasetSnapshot::from_content(&content)
    }
}

/// Calculate SHA256 hash of content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Bisaya,Tagalog,English,Part of Speech,Pronunciation,Category,\
Beginner Example (Bisaya),Beginner English Translation,Beginner Tagalog Translation,\
Intermediate Example (Bisaya),Intermediate English Translation,Intermediate Tagalog Translation,\
Advanced Example (Bisaya),Advanced English Translation,Advanced Tagalog Translation";

    fn csv_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    const KAON: &str = "kaon,kain,eat,Verb,ka-on,Food,Mokaon ko.,I will eat.,,\
Nagkaon siya.,He is eating.,,Gikaon na nimo?,Did you eat it?,";

    #[test]
    fn test_hash_content() {
        let hash = hash_content("hello");
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn loads_and_caches() {
        let file = csv_file(&[KAON]);
        let provider = DatasetProvider::new(file.path(), Duration::from_secs(5));
        assert!(!provider.is_loaded());
        assert!(provider.get_all_entries().is_empty());

        let first = provider.load_dataset().await;
        assert_eq!(first.entries.len(), 1);
        assert_eq!(first.entries[0].source_word, "kaon");
        assert_eq!(first.content_hash.len(), 64);

        std::fs::write(file.path(), HEADER).unwrap();
        let second = provider.load_dataset().await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.get_all_entries().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty() {
        let provider = DatasetProvider::new("/nonexistent/bisaya.csv", Duration::from_secs(1));
        let snapshot = provider.load_dataset().await;
        assert!(snapshot.is_empty());
        assert!(provider.is_loaded());
    }

    #[tokio::test]
    async fn parse_failure_degrades_to_empty() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not,a,dataset").unwrap();
        let provider = DatasetProvider::new(file.path(), Duration::from_secs(1));
        assert!(matches!(
            provider.try_load().await,
            Err(DatasetError::Parse(_))
        ));
        assert!(provider.load_dataset().await.is_empty());
    }

    #[tokio::test]
    async fn zero_timeout_degrades_to_empty() {
        let file = csv_file(&[KAON]);
        let provider = DatasetProvider::new(file.path(), Duration::ZERO);
        // A zero deadline can still race an immediately ready read.
        match provider.try_load().await {
            Err(DatasetError::Timeout(d)) => assert_eq!(d, Duration::ZERO),
            Ok(snapshot) => assert_eq!(snapshot.entries.len(), 1),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn preloaded_skips_io() {
        let provider = DatasetProvider::preloaded(vec![VocabularyEntry {
            source_word: "balay".to_string(),
            ..Default::default()
        }]);
        assert!(provider.is_loaded());
        assert_eq!(provider.load_dataset().await.entries.len(), 1);
    }
}
