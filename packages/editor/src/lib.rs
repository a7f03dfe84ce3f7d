//! # Folio Editor
//!
//! Editing engine for block pages: tree operations, block creation from form
//! input, editable rendering with update continuations, drag reordering and
//! the edit session that owns a page while it is open.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Block tree + Settings → Snapshot     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Forms → validated blocks (creator)       │
//! │  - Handles → new root lists (editable)      │
//! │  - Path-addressed mutations                 │
//! │  - Drag reorder of the top-level list       │
//! │  - Save tickets for async persistence       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: Snapshot → static HTML       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every edit returns a new root list
//! 2. **One owner**: the session holds the only mutable copy
//! 3. **Validate at the boundary**: forms and mutations are checked, tree
//!    operations trust their indices
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{BlockForm, EditSession, TextForm};
//! use folio_model::Snapshot;
//!
//! let mut session = EditSession::new("home", Snapshot::new_page("Home", ""));
//!
//! session.create_block(&[], 0, &BlockForm::Text(TextForm {
//!     content: "# Welcome".to_string(),
//!     ..Default::default()
//! }))?;
//!
//! let ticket = session.begin_save()?;
//! let result = storage.save(&ticket.page_id, &ticket.snapshot).await;
//! session.finish_save(&ticket, result.map_err(|e| e.to_string()));
//! ```

pub mod creator;
pub mod drag;
pub mod editable;
mod errors;
pub mod mutations;
mod session;
mod span;
pub mod tree_ops;

pub use creator::{
    apply_edit, create_block, new_block, BlockForm, ButtonForm, EditForm, GridForm, ImageForm,
    SpacerForm, TextForm, DEFAULT_TEXT,
};
pub use drag::{reorder, DragController, DragEvent, DragOutcome, DragState};
pub use editable::{render_editable, EditableList, EditableNode, ListHandle, NodeHandle};
pub use errors::{EditorError, ValidationError};
pub use mutations::{ContainerPath, Mutation, MutationError};
pub use session::{EditSession, SaveOutcome, SavePolicy, SaveTicket};
pub use span::SpanPolicy;
pub use tree_ops::{delete_at, insert_at, move_to, update_at};
