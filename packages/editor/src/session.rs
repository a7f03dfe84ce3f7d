//! # Edit Session
//!
//! One editing session over one page. The session is the single owner of the
//! block tree and settings; every edit goes through it and bumps `version`.
//!
//! ## Saving
//!
//! Persistence is asynchronous and lives outside this crate, so a save is
//! split in two:
//!
//! 1. [`EditSession::begin_save`] captures a snapshot and issues a ticket.
//! 2. [`EditSession::finish_save`] reports the storage result for a ticket.
//!
//! Edits may continue while a save is pending. The session only counts as
//! clean once a save for its current version has succeeded.
//!
//! Overlapping saves follow the configured [`SavePolicy`].

use crate::creator::{apply_edit, new_block, BlockForm, EditForm};
use crate::drag::{DragController, DragEvent, DragOutcome};
use crate::editable::{render_editable, EditableList};
use crate::mutations::{resolve_container, resolve_parent_grid, Mutation};
use crate::{EditorError, SpanPolicy};
use folio_model::{Block, Settings, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What to do when a save is requested while another is still pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SavePolicy {
    /// Refuse the new save until the pending one finishes
    #[default]
    RejectWhilePending,

    /// Issue a new ticket; results for older tickets are ignored
    LastWriteWins,
}

/// A snapshot captured for one save attempt
#[derive(Debug, Clone)]
pub struct SaveTicket {
    pub id: u64,
    pub page_id: String,
    /// Session version the snapshot was taken at
    pub version: u64,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { version: u64 },
    Failed { message: String },
    /// A newer ticket was issued after this one
    Superseded,
}

pub struct EditSession {
    /// Page identifier used with storage
    pub page_id: String,

    settings: Settings,
    blocks: Vec<Block>,

    /// Increments on every successful edit
    version: u64,
    saved_version: u64,

    span_policy: SpanPolicy,
    save_policy: SavePolicy,

    next_ticket: u64,
    pending_ticket: Option<u64>,
    last_error: Option<String>,

    drag: DragController,
}

impl EditSession {
    /// Start a session over a loaded snapshot
    pub fn new(page_id: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            page_id: page_id.into(),
            settings: snapshot.settings,
            blocks: snapshot.blocks,
            version: 0,
            saved_version: 0,
            span_policy: SpanPolicy::default(),
            save_policy: SavePolicy::default(),
            next_ticket: 1,
            pending_ticket: None,
            last_error: None,
            drag: DragController::new(),
        }
    }

    pub fn with_span_policy(mut self, policy: SpanPolicy) -> Self {
        self.span_policy = policy;
        self
    }

    pub fn with_save_policy(mut self, policy: SavePolicy) -> Self {
        self.save_policy = policy;
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn span_policy(&self) -> SpanPolicy {
        self.span_policy
    }

    pub fn save_policy(&self) -> SavePolicy {
        self.save_policy
    }

    /// Edits not yet covered by a successful save
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    pub fn is_saving(&self) -> bool {
        self.pending_ticket.is_some()
    }

    /// Message from the last failed save, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.settings.clone(), self.blocks.clone())
    }

    /// End the session, handing back its current state
    pub fn into_snapshot(self) -> Snapshot {
        if self.is_dirty() {
            warn!(
                page_id = %self.page_id,
                version = self.version,
                "Closing session with unsaved edits"
            );
        }
        Snapshot::new(self.settings, self.blocks)
    }

    /// Replace the root list (used with handles from [`EditSession::render_editable`])
    pub fn commit(&mut self, blocks: Vec<Block>) -> u64 {
        self.blocks = blocks;
        self.bump()
    }

    pub fn update_settings(&mut self, settings: Settings) -> u64 {
        self.settings = settings;
        self.bump()
    }

    /// Apply a path-addressed mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<u64, EditorError> {
        let blocks = mutation.apply(&self.blocks)?;
        Ok(self.commit(blocks))
    }

    /// Create a block from form input inside the container at `path`
    pub fn create_block(
        &mut self,
        path: &[usize],
        position: usize,
        form: &BlockForm,
    ) -> Result<u64, EditorError> {
        let list = resolve_container(&self.blocks, path)?;
        let block = new_block(list, position, form)?;
        self.apply(Mutation::InsertBlock {
            path: path.to_vec(),
            index: position,
            block,
        })
    }

    /// Apply an edit form to the block at `index` of the container at `path`
    pub fn edit_block(
        &mut self,
        path: &[usize],
        index: usize,
        form: &EditForm,
    ) -> Result<u64, EditorError> {
        let list = resolve_container(&self.blocks, path)?;
        let parent_size = resolve_parent_grid(&self.blocks, path)?.map(|grid| grid.size);

        let current = list.get(index).ok_or(crate::MutationError::IndexOutOfRange {
            index,
            len: list.len(),
        })?;
        let block = apply_edit(current, form, parent_size, self.span_policy)?;

        self.apply(Mutation::UpdateBlock {
            path: path.to_vec(),
            index,
            block,
        })
    }

    pub fn remove_block(&mut self, path: &[usize], index: usize) -> Result<u64, EditorError> {
        self.apply(Mutation::RemoveBlock {
            path: path.to_vec(),
            index,
        })
    }

    pub fn render_editable(&self) -> EditableList {
        render_editable(&self.blocks)
    }

    /// Feed a drag event for the top-level list; a completed move is committed
    pub fn drag(&mut self, event: DragEvent) -> DragOutcome {
        let outcome = self.drag.handle(event, &self.blocks);
        if let DragOutcome::Moved { blocks, .. } = &outcome {
            self.blocks = blocks.clone();
            self.bump();
        }
        outcome
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Capture the current state for persistence
    pub fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        if self.pending_ticket.is_some() && self.save_policy == SavePolicy::RejectWhilePending {
            debug!(page_id = %self.page_id, "Save requested while another is pending");
            return Err(EditorError::SaveInProgress);
        }

        let id = self.next_ticket;
        self.next_ticket += 1;
        self.pending_ticket = Some(id);

        debug!(page_id = %self.page_id, ticket = id, version = self.version, "Save started");

        Ok(SaveTicket {
            id,
            page_id: self.page_id.clone(),
            version: self.version,
            snapshot: self.snapshot(),
        })
    }

    /// Record the storage result for a ticket
    pub fn finish_save(&mut self, ticket: &SaveTicket, result: Result<(), String>) -> SaveOutcome {
        if self.pending_ticket != Some(ticket.id) {
            debug!(
                page_id = %self.page_id,
                ticket = ticket.id,
                "Ignoring result of superseded save"
            );
            return SaveOutcome::Superseded;
        }
        self.pending_ticket = None;

        match result {
            Ok(()) => {
                self.saved_version = self.saved_version.max(ticket.version);
                self.last_error = None;
                info!(page_id = %self.page_id, version = ticket.version, "Page saved");
                SaveOutcome::Saved {
                    version: ticket.version,
                }
            }
            Err(message) => {
                warn!(
                    page_id = %self.page_id,
                    error = %message,
                    "Save failed, keeping local edits"
                );
                self.last_error = Some(message.clone());
                SaveOutcome::Failed { message }
            }
        }
    }

    fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creator::{GridForm, TextForm};

    fn session() -> EditSession {
        EditSession::new(
            "my-page",
            Snapshot::new(
                Settings::new("My Page", ""),
                vec![Block::text("a", "a"), Block::image("b", "https://x/b.png", "b")],
            ),
        )
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.page_id, "my-page");
        assert_eq!(session.version(), 0);
        assert!(!session.is_dirty());
        assert!(!session.is_saving());
        assert_eq!(session.blocks().len(), 2);
    }

    #[test]
    fn test_create_grid_between_blocks() {
        let mut session = session();
        let form = BlockForm::Grid(GridForm {
            size: "2".into(),
            color: String::new(),
        });

        session.create_block(&[], 1, &form).unwrap();

        let ids: Vec<_> = session.blocks().iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["a", "grid-1", "b"]);
        assert_eq!(session.version(), 1);
        assert!(session.is_dirty());
    }

    #[test]
    fn test_rejected_form_does_not_bump_version() {
        let mut session = session();
        let form = BlockForm::Grid(GridForm::default());

        assert!(matches!(
            session.create_block(&[], 0, &form),
            Err(EditorError::Validation(_))
        ));
        assert_eq!(session.version(), 0);
        assert_eq!(session.blocks().len(), 2);
    }

    #[test]
    fn test_editable_commit() {
        let mut session = session();
        let view = session.render_editable();
        let root = view.nodes[0]
            .handle
            .insert_after(&BlockForm::Text(TextForm::default()))
            .unwrap();

        session.commit(root);
        assert_eq!(session.blocks()[1].id(), "text-1");
    }

    #[test]
    fn test_save_cycle_clears_dirty() {
        let mut session = session();
        session.remove_block(&[], 0).unwrap();

        let ticket = session.begin_save().unwrap();
        assert!(session.is_saving());
        assert_eq!(ticket.snapshot.blocks.len(), 1);

        assert_eq!(
            session.finish_save(&ticket, Ok(())),
            SaveOutcome::Saved { version: 1 }
        );
        assert!(!session.is_dirty());
        assert!(!session.is_saving());
    }

    #[test]
    fn test_edit_during_save_stays_dirty() {
        let mut session = session();
        session.remove_block(&[], 0).unwrap();
        let ticket = session.begin_save().unwrap();

        session.remove_block(&[], 0).unwrap();
        session.finish_save(&ticket, Ok(()));

        assert!(session.is_dirty());
    }

    #[test]
    fn test_failed_save_keeps_edits() {
        let mut session = session();
        session.remove_block(&[], 1).unwrap();
        let ticket = session.begin_save().unwrap();

        let outcome = session.finish_save(&ticket, Err("backend unavailable".into()));

        assert_eq!(
            outcome,
            SaveOutcome::Failed {
                message: "backend unavailable".into()
            }
        );
        assert_eq!(session.last_error(), Some("backend unavailable"));
        assert!(session.is_dirty());
        assert_eq!(session.blocks().len(), 1);

        // Retry succeeds and clears the error
        let retry = session.begin_save().unwrap();
        session.finish_save(&retry, Ok(()));
        assert_eq!(session.last_error(), None);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_reject_while_pending() {
        let mut session = session();
        let _first = session.begin_save().unwrap();
        assert!(matches!(session.begin_save(), Err(EditorError::SaveInProgress)));
    }

    #[test]
    fn test_last_write_wins_ignores_stale_result() {
        let mut session = session().with_save_policy(SavePolicy::LastWriteWins);

        let first = session.begin_save().unwrap();
        session.remove_block(&[], 0).unwrap();
        let second = session.begin_save().unwrap();

        assert_eq!(session.finish_save(&first, Ok(())), SaveOutcome::Superseded);
        assert!(session.is_saving());

        assert_eq!(
            session.finish_save(&second, Ok(())),
            SaveOutcome::Saved { version: 1 }
        );
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_drag_commits_move() {
        let mut session = session();
        session.drag(DragEvent::Grab("b".into()));
        assert!(session.is_dragging());

        let outcome = session.drag(DragEvent::Release(Some("a".into())));
        assert!(matches!(outcome, DragOutcome::Moved { from: 1, to: 0, .. }));
        assert_eq!(session.blocks()[0].id(), "b");
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_cancelled_drag_does_not_bump_version() {
        let mut session = session();
        session.drag(DragEvent::Grab("b".into()));
        assert_eq!(session.drag(DragEvent::Escape), DragOutcome::Cancelled);
        assert_eq!(session.version(), 0);
    }
}
