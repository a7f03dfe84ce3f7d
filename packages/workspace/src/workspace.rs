use crate::config::{Config, ConfigError};
use crate::storage::{FileStorage, PageRecord, PageStorage, StorageError};
use folio_compiler_html::{compile_page, CommonMark, CompileError};
use folio_editor::{EditSession, EditorError, SaveOutcome};
use folio_model::visitor::find_span_violations;
use folio_model::{slugify, Snapshot};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page already exists: {0}")]
    PageExists(String),

    #[error("Page title has no letters or digits: {0:?}")]
    InvalidTitle(String),

    #[error("Page is not open: {0}")]
    SessionNotOpen(String),
}

/// Pages in one storage backend, plus the edit sessions currently open on them
pub struct Workspace<S: PageStorage> {
    storage: S,
    config: Config,
    sessions: HashMap<String, EditSession>,
}

impl Workspace<FileStorage> {
    /// Load `folio.config.json` from `cwd` and store pages under its storage dir
    pub fn open_dir(cwd: &Path) -> Result<Self, WorkspaceError> {
        let config = Config::load(cwd)?;
        let storage = FileStorage::new(config.get_storage_dir(cwd));
        info!(root = %storage.root().display(), "Opened workspace");
        Ok(Self::new(storage, config))
    }
}

impl<S: PageStorage> Workspace<S> {
    pub fn new(storage: S, config: Config) -> Self {
        Self {
            storage,
            config,
            sessions: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Create an empty page; its id is the slug of `title`
    pub async fn create_page(
        &self,
        title: &str,
        description: &str,
    ) -> Result<PageRecord, WorkspaceError> {
        let id = slugify(title);
        if !id.chars().any(char::is_alphanumeric) {
            return Err(WorkspaceError::InvalidTitle(title.to_string()));
        }
        if self.storage.exists(&id).await? {
            return Err(WorkspaceError::PageExists(id));
        }

        let record = self
            .storage
            .write(&id, &Snapshot::new_page(title, description))
            .await?;

        info!(id = %record.id, "Created page");
        Ok(record)
    }

    pub async fn list_pages(&self) -> Result<Vec<PageRecord>, WorkspaceError> {
        Ok(self.storage.list().await?)
    }

    /// Start editing a page, or return the session already open on it
    pub async fn open(&mut self, id: &str) -> Result<&mut EditSession, WorkspaceError> {
        if !self.sessions.contains_key(id) {
            let record = self.storage.read(id).await?;

            let violations = find_span_violations(&record.content.blocks);
            if !violations.is_empty() {
                warn!(
                    id,
                    count = violations.len(),
                    "Page has column spans wider than their grid"
                );
            }

            let session = EditSession::new(id, record.content)
                .with_span_policy(self.config.span_policy)
                .with_save_policy(self.config.save_policy);

            debug!(id, "Opened edit session");
            self.sessions.insert(id.to_string(), session);
        }

        self.session_mut(id)
    }

    pub fn session(&self, id: &str) -> Option<&EditSession> {
        self.sessions.get(id)
    }

    pub fn session_mut(&mut self, id: &str) -> Result<&mut EditSession, WorkspaceError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::SessionNotOpen(id.to_string()))
    }

    /// Persist the open session's current state.
    ///
    /// On failure the session keeps its edits and records the error, so the
    /// save can be retried.
    pub async fn save(&mut self, id: &str) -> Result<SaveOutcome, WorkspaceError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::SessionNotOpen(id.to_string()))?;

        let ticket = session.begin_save()?;
        let result = self.storage.write(&ticket.page_id, &ticket.snapshot).await;

        match result {
            Ok(_) => Ok(session.finish_save(&ticket, Ok(()))),
            Err(e) => {
                session.finish_save(&ticket, Err(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// End the session and return its final state. Unsaved edits are dropped.
    pub fn close(&mut self, id: &str) -> Option<Snapshot> {
        self.sessions.remove(id).map(EditSession::into_snapshot)
    }

    pub async fn delete_page(&mut self, id: &str) -> Result<(), WorkspaceError> {
        self.storage.delete(id).await?;
        self.sessions.remove(id);
        info!(id, "Deleted page");
        Ok(())
    }

    pub async fn set_published(
        &self,
        id: &str,
        published: bool,
    ) -> Result<PageRecord, WorkspaceError> {
        let record = self.storage.set_published(id, published).await?;
        info!(id, published, "Changed publication state");
        Ok(record)
    }

    /// Static HTML of the page as persisted
    pub async fn preview(&self, id: &str) -> Result<String, WorkspaceError> {
        let record = self.storage.read(id).await?;
        Ok(compile_page(&record.content, self.config.compile.clone(), &CommonMark)?)
    }

    /// Static HTML of the open session, including unsaved edits
    pub fn preview_draft(&self, id: &str) -> Result<String, WorkspaceError> {
        let session = self
            .session(id)
            .ok_or_else(|| WorkspaceError::SessionNotOpen(id.to_string()))?;
        Ok(compile_page(&session.snapshot(), self.config.compile.clone(), &CommonMark)?)
    }
}
