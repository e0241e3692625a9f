//! Data persistence layer
//!
//! This module stores a single serde value as a JSON document on disk. Writes
//! go through a temp file and a rename so a crash mid-write never leaves a
//! truncated document behind.

use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Persistence error types
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The file exists but does not hold the expected document
    #[error("Corruption detected: {0}")]
    Corruption(String),
}

impl PersistenceError {
    /// Whether the error means the document is missing or unreadable, as
    /// opposed to the filesystem refusing the operation.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PersistenceError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            PersistenceError::Serialization(_) | PersistenceError::Corruption(_) => true,
        }
    }
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Path to the persistence file
    pub path: PathBuf,
    /// Enable atomic writes with temp files
    pub atomic_writes: bool,
    /// Pretty-print the document
    pub pretty: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("state.json"),
            atomic_writes: true,
            pretty: false,
        }
    }
}

impl PersistenceConfig {
    /// Create a new configuration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Enable or disable atomic writes
    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Enable or disable pretty-printed output
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }
}

/// A JSON document on disk holding one value of type `T`
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    config: PersistenceConfig,
    _phantom: PhantomData<T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a handle for the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(PersistenceConfig::new(path))
    }

    /// Create a handle with explicit configuration
    pub fn with_config(config: PersistenceConfig) -> Self {
        Self { config, _phantom: PhantomData }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read and decode the document
    pub async fn load(&self) -> Result<T> {
        let contents = fs::read_to_string(&self.config.path).await?;
        if contents.trim().is_empty() {
            return Err(PersistenceError::Corruption(format!(
                "{} is empty",
                self.config.path.display()
            )));
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Encode and write the document
    pub async fn save(&self, value: &T) -> Result<()> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        if self.config.atomic_writes {
            self.write_atomic(&json).await
        } else {
            fs::write(&self.config.path, json).await?;
            Ok(())
        }
    }

    /// Load the document, replacing it with `init()` when it is missing or
    /// cannot be decoded.
    ///
    /// The replacement is written first and then read back, so the returned
    /// value is always what is on disk.
    pub async fn load_or_init<F>(&self, init: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        match self.load().await {
            Ok(value) => Ok(value),
            Err(e) if e.is_recoverable() => {
                tracing::warn!(
                    path = %self.config.path.display(),
                    error = %e,
                    "Replacing missing or unreadable document"
                );
                self.save(&init()).await?;
                self.load().await
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the backing file if present
    pub async fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.config.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write atomically using temp file + rename
    async fn write_atomic(&self, contents: &str) -> Result<()> {
        let temp_path = self.config.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.config.path).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestState {
        counter: i32,
        name: String,
    }

    fn sample() -> TestState {
        TestState { counter: 7, name: "seed".to_string() }
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let file: JsonFile<TestState> = JsonFile::new(dir.path().join("state.json"));

        file.save(&TestState { counter: 42, name: "test".to_string() }).await.unwrap();

        let loaded = file.load().await.unwrap();
        assert_eq!(loaded.counter, 42);
        assert_eq!(loaded.name, "test");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let file: JsonFile<TestState> = JsonFile::new(dir.path().join("missing.json"));

        let err = file.load().await.unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_load_or_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let file: JsonFile<TestState> = JsonFile::new(&path);

        let value = file.load_or_init(sample).await.unwrap();
        assert_eq!(value, sample());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_load_or_init_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let file: JsonFile<TestState> = JsonFile::new(dir.path().join("state.json"));
        let existing = TestState { counter: 99, name: "persisted".to_string() };
        file.save(&existing).await.unwrap();

        let value = file.load_or_init(sample).await.unwrap();
        assert_eq!(value, existing);
    }

    #[tokio::test]
    async fn test_load_or_init_replaces_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").await.unwrap();

        let file: JsonFile<TestState> = JsonFile::new(&path);
        let value = file.load_or_init(sample).await.unwrap();
        assert_eq!(value, sample());

        // The file on disk was rewritten as well
        let reloaded = file.load().await.unwrap();
        assert_eq!(reloaded, sample());
    }

    #[tokio::test]
    async fn test_empty_file_is_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "  \n").await.unwrap();

        let file: JsonFile<TestState> = JsonFile::new(&path);
        assert!(matches!(file.load().await, Err(PersistenceError::Corruption(_))));
    }

    #[tokio::test]
    async fn test_atomic_writes() {
        let dir = TempDir::new().unwrap();
        let config = PersistenceConfig::new(dir.path().join("atomic.json")).atomic_writes(true);
        let file: JsonFile<TestState> = JsonFile::with_config(config.clone());

        file.save(&sample()).await.unwrap();

        // Verify temp file was cleaned up
        let temp_path = config.path.with_extension("tmp");
        assert!(!temp_path.exists());
        assert!(config.path.exists());
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");
        let file: JsonFile<TestState> = JsonFile::new(&path);

        file.save(&sample()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = TempDir::new().unwrap();
        let file: JsonFile<TestState> = JsonFile::new(dir.path().join("state.json"));
        file.save(&sample()).await.unwrap();

        file.remove().await.unwrap();
        assert!(!file.path().exists());

        // Removing twice is fine
        file.remove().await.unwrap();
    }

    #[tokio::test]
    async fn test_pretty_output() {
        let dir = TempDir::new().unwrap();
        let config = PersistenceConfig::new(dir.path().join("pretty.json")).pretty(true);
        let file: JsonFile<TestState> = JsonFile::with_config(config);

        file.save(&sample()).await.unwrap();
        let raw = fs::read_to_string(file.path()).await.unwrap();
        assert!(raw.contains('\n'));
    }
}
