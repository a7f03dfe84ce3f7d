//! # Drag Reordering
//!
//! Per-gesture state machine for reordering the top-level list.
//!
//! ```text
//! Idle ──grab(id)──▶ Dragging ──release(over)──▶ Idle   (move applied)
//!                        │
//!                        └──release(None) / escape──▶ Idle   (cancelled)
//! ```
//!
//! The gesture tracks block ids, not indices. Indices are resolved against
//! the list as it is at drop time, so edits made mid-gesture cannot make the
//! move land on the wrong block.

use crate::tree_ops::move_to;
use folio_model::Block;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { active_id: String },
}

/// Pointer or keyboard input relevant to a drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// Pointer or key down on a block's handle
    Grab(String),
    /// Pointer up / drop key; `None` when not over a valid target
    Release(Option<String>),
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Started,
    /// Event not valid in the current state
    Ignored,
    /// Dropped on itself, or an id no longer resolves
    Unchanged,
    Cancelled,
    Moved {
        from: usize,
        to: usize,
        blocks: Vec<Block>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Feed one input event
    pub fn handle(&mut self, event: DragEvent, blocks: &[Block]) -> DragOutcome {
        match event {
            DragEvent::Grab(id) => self.start(id),
            DragEvent::Release(over) => self.drop_on(blocks, over.as_deref()),
            DragEvent::Escape => self.cancel(),
        }
    }

    pub fn start(&mut self, id: impl Into<String>) -> DragOutcome {
        if self.is_dragging() {
            return DragOutcome::Ignored;
        }

        let active_id = id.into();
        debug!(id = %active_id, "Drag started");
        self.state = DragState::Dragging { active_id };
        DragOutcome::Started
    }

    pub fn cancel(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Dragging { active_id } => {
                debug!(id = %active_id, "Drag cancelled");
                DragOutcome::Cancelled
            }
        }
    }

    /// Finish the gesture over `over` (or over nothing)
    pub fn drop_on(&mut self, blocks: &[Block], over: Option<&str>) -> DragOutcome {
        let active_id = match std::mem::take(&mut self.state) {
            DragState::Idle => return DragOutcome::Ignored,
            DragState::Dragging { active_id } => active_id,
        };

        let Some(over_id) = over else {
            debug!(id = %active_id, "Drag released outside any target");
            return DragOutcome::Cancelled;
        };

        match reorder(blocks, &active_id, over_id) {
            Some((from, to, blocks)) => {
                debug!(from, to, "Drag moved block");
                DragOutcome::Moved { from, to, blocks }
            }
            None => DragOutcome::Unchanged,
        }
    }
}

/// Move the block with `active_id` to the index currently held by `over_id`.
///
/// Returns `None` when both ids are the same or either is missing.
pub fn reorder(
    blocks: &[Block],
    active_id: &str,
    over_id: &str,
) -> Option<(usize, usize, Vec<Block>)> {
    if active_id == over_id {
        return None;
    }

    let from = blocks.iter().position(|b| b.id() == active_id)?;
    let to = blocks.iter().position(|b| b.id() == over_id)?;

    Some((from, to, move_to(blocks, from, to)))
}
