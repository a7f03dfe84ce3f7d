//! Page persistence.
//!
//! A page is stored as one [`PageRecord`]: its snapshot plus publication
//! state and timestamps. Writes replace the whole record, so a reader only
//! ever sees a complete snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_model::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Invalid page id: {0:?}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed page record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A persisted page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: String,
    pub content: Snapshot,
    #[serde(default)]
    pub published: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl PageRecord {
    pub fn new(id: impl Into<String>, content: Snapshot) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            content,
            published: false,
            created: now,
            updated: now,
        }
    }

    /// Replace the content, keeping identity and publication state
    fn revise(mut self, content: Snapshot) -> Self {
        self.content = content;
        self.updated = Utc::now();
        self
    }
}

#[async_trait]
pub trait PageStorage: Send + Sync {
    async fn read(&self, id: &str) -> Result<PageRecord, StorageError>;

    /// Store a snapshot, creating the record if it does not exist yet
    async fn write(&self, id: &str, content: &Snapshot) -> Result<PageRecord, StorageError>;

    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    async fn set_published(&self, id: &str, published: bool) -> Result<PageRecord, StorageError>;

    /// All records, ordered by id
    async fn list(&self) -> Result<Vec<PageRecord>, StorageError>;

    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        match self.read(id).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Ids become file names, so only a conservative character set is allowed
pub fn validate_id(id: &str) -> Result<(), StorageError> {
    let valid = !id.is_empty()
        && !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidId(id.to_string()))
    }
}

/// In-process storage, mostly for tests and previews
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pages: RwLock<HashMap<String, PageRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageStorage for MemoryStorage {
    async fn read(&self, id: &str) -> Result<PageRecord, StorageError> {
        validate_id(id)?;
        self.pages
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn write(&self, id: &str, content: &Snapshot) -> Result<PageRecord, StorageError> {
        validate_id(id)?;

        let mut pages = self.pages.write().await;
        let record = match pages.remove(id) {
            Some(existing) => existing.revise(content.clone()),
            None => PageRecord::new(id, content.clone()),
        };
        pages.insert(id.to_string(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        validate_id(id)?;
        self.pages
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn set_published(&self, id: &str, published: bool) -> Result<PageRecord, StorageError> {
        validate_id(id)?;
        let mut pages = self.pages.write().await;
        let record = pages
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        record.published = published;
        record.updated = Utc::now();
        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<PageRecord>, StorageError> {
        let mut records: Vec<_> = self.pages.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}

/// One JSON file per page under a root directory.
///
/// Records are written to a temporary file and renamed into place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StorageError> {
        validate_id(id)?;
        Ok(self.root.join(format!("{}.json", id)))
    }

    async fn load(path: &Path, id: &str) -> Result<PageRecord, StorageError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    async fn store(&self, path: &Path, record: &PageRecord) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;

        debug!(id = %record.id, path = %path.display(), "Wrote page record");
        Ok(())
    }
}

#[async_trait]
impl PageStorage for FileStorage {
    async fn read(&self, id: &str) -> Result<PageRecord, StorageError> {
        let path = self.path_for(id)?;
        Self::load(&path, id).await
    }

    async fn write(&self, id: &str, content: &Snapshot) -> Result<PageRecord, StorageError> {
        let path = self.path_for(id)?;
        let record = match Self::load(&path, id).await {
            Ok(existing) => existing.revise(content.clone()),
            Err(StorageError::NotFound(_)) => PageRecord::new(id, content.clone()),
            Err(e) => return Err(e),
        };
        self.store(&path, &record).await?;
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(id, "Deleted page");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set_published(&self, id: &str, published: bool) -> Result<PageRecord, StorageError> {
        let path = self.path_for(id)?;
        let mut record = Self::load(&path, id).await?;
        record.published = published;
        record.updated = Utc::now();
        self.store(&path, &record).await?;
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<PageRecord>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            records.push(Self::load(&path, id).await?);
        }

        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}
