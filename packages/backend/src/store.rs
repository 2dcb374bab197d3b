//! Document persistence
//!
//! The whole study state is one JSON document. [`DocumentStore`] is the seam
//! the session talks to; [`JsonFileStore`] keeps the document in a single file
//! on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use flashdeck_algo::Document;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document rejected: {0}")]
    Parse(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read and validate the stored document.
    async fn load(&self) -> StoreResult<Document>;

    /// Replace the stored document.
    async fn save(&self, doc: &Document) -> StoreResult<()>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Document> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(err) => return Err(err.into()),
        };

        Document::from_json(&raw).map_err(|err| StoreError::Parse(err.to_string()))
    }

    async fn save(&self, doc: &Document) -> StoreResult<()> {
        let body = doc
            .to_json_pretty()
            .map_err(|err| StoreError::Parse(err.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // write-then-rename so a crash mid-write never truncates the document
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "document saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
