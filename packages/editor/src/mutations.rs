//! # Block Mutations
//!
//! Serializable, path-addressed structural edits.
//!
//! ## Addressing
//!
//! A mutation names a container by its path from the root: the list of grid
//! indices to descend through. `[]` is the root list, `[2]` is the children
//! of the grid at root index 2, `[2, 0]` the children of the first child of
//! that grid, and so on.
//!
//! ## Application
//!
//! Applying a mutation descends to the container, runs the matching tree
//! operation there, then rebuilds each enclosing grid with its new children
//! on the way back up. The input tree is never modified; a new root list is
//! returned.
//!
//! Unlike the raw tree operations, mutations check their indices and report
//! a [`MutationError`] instead of panicking, since they may come from
//! outside the process.

use crate::tree_ops::{delete_at, insert_at, move_to, update_at};
use folio_model::{Block, GridBlock};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Sequence of grid indices from the root to a container
pub type ContainerPath = Vec<usize>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert a block before `index` in the container at `path`
    InsertBlock {
        path: ContainerPath,
        index: usize,
        block: Block,
    },

    /// Replace the block at `index`
    UpdateBlock {
        path: ContainerPath,
        index: usize,
        block: Block,
    },

    /// Remove the block at `index` along with its descendants
    RemoveBlock { path: ContainerPath, index: usize },

    /// Reorder within one container
    MoveBlock {
        path: ContainerPath,
        from: usize,
        to: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Index {index} out of range for container of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Path {path:?} does not lead to a container")]
    InvalidPath { path: ContainerPath },

    #[error("Block at index {index} is not a grid")]
    NotAContainer { index: usize },

    #[error("Duplicate block id among siblings: {0}")]
    DuplicateId(String),
}

impl Mutation {
    pub fn path(&self) -> &[usize] {
        match self {
            Mutation::InsertBlock { path, .. }
            | Mutation::UpdateBlock { path, .. }
            | Mutation::RemoveBlock { path, .. }
            | Mutation::MoveBlock { path, .. } => path,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertBlock { .. } => "insert",
            Mutation::UpdateBlock { .. } => "update",
            Mutation::RemoveBlock { .. } => "remove",
            Mutation::MoveBlock { .. } => "move",
        }
    }

    /// Apply to a root list, returning the new root
    pub fn apply(&self, root: &[Block]) -> Result<Vec<Block>, MutationError> {
        self.validate(root)?;

        debug!(mutation = self.name(), path = ?self.path(), "Applying mutation");

        rewrite_container(root, self.path(), &mut |list| match self {
            Mutation::InsertBlock { index, block, .. } => insert_at(list, *index, block.clone()),
            Mutation::UpdateBlock { index, block, .. } => update_at(list, *index, block.clone()),
            Mutation::RemoveBlock { index, .. } => delete_at(list, *index),
            Mutation::MoveBlock { from, to, .. } => move_to(list, *from, *to),
        })
    }

    /// Validate without applying
    pub fn validate(&self, root: &[Block]) -> Result<(), MutationError> {
        let list = resolve_container(root, self.path())?;
        let len = list.len();

        match self {
            Mutation::InsertBlock { index, block, .. } => {
                check_index(*index, len + 1, len)?;
                if list.iter().any(|b| b.id() == block.id()) {
                    return Err(MutationError::DuplicateId(block.id().to_string()));
                }
                Ok(())
            }

            Mutation::UpdateBlock { index, block, .. } => {
                check_index(*index, len, len)?;
                let current = &list[*index];
                if current.id() != block.id() {
                    warn!(from = %current.id(), to = %block.id(), "Update changes block identity");
                    let clash = list
                        .iter()
                        .enumerate()
                        .any(|(i, b)| i != *index && b.id() == block.id());
                    if clash {
                        return Err(MutationError::DuplicateId(block.id().to_string()));
                    }
                }
                Ok(())
            }

            Mutation::RemoveBlock { index, .. } => check_index(*index, len, len),

            Mutation::MoveBlock { from, to, .. } => {
                check_index(*from, len, len)?;
                check_index(*to, len, len)
            }
        }
    }
}

fn check_index(index: usize, bound: usize, len: usize) -> Result<(), MutationError> {
    if index < bound {
        Ok(())
    } else {
        Err(MutationError::IndexOutOfRange { index, len })
    }
}

/// Follow `path` from the root to a container's child list
pub fn resolve_container<'a>(
    root: &'a [Block],
    path: &[usize],
) -> Result<&'a [Block], MutationError> {
    let mut list = root;
    for &index in path {
        list = match list.get(index) {
            Some(Block::Grid(grid)) => &grid.children,
            Some(_) => return Err(MutationError::NotAContainer { index }),
            None => {
                return Err(MutationError::InvalidPath {
                    path: path.to_vec(),
                })
            }
        };
    }
    Ok(list)
}

/// Grid that owns the container at `path`, if the path is not the root
pub fn resolve_parent_grid<'a>(
    root: &'a [Block],
    path: &[usize],
) -> Result<Option<&'a GridBlock>, MutationError> {
    match path.split_last() {
        None => Ok(None),
        Some((&last, prefix)) => {
            let list = resolve_container(root, prefix)?;
            match list.get(last) {
                Some(Block::Grid(grid)) => Ok(Some(grid)),
                Some(_) => Err(MutationError::NotAContainer { index: last }),
                None => Err(MutationError::InvalidPath {
                    path: path.to_vec(),
                }),
            }
        }
    }
}

/// Rewrite the container at `path` with `edit`, rebuilding every enclosing
/// grid so the change reaches the root.
fn rewrite_container(
    list: &[Block],
    path: &[usize],
    edit: &mut dyn FnMut(&[Block]) -> Vec<Block>,
) -> Result<Vec<Block>, MutationError> {
    match path.split_first() {
        None => Ok(edit(list)),
        Some((&index, rest)) => {
            let grid = match list.get(index) {
                Some(Block::Grid(grid)) => grid,
                Some(_) => return Err(MutationError::NotAContainer { index }),
                None => {
                    return Err(MutationError::InvalidPath {
                        path: path.to_vec(),
                    })
                }
            };

            let children = rewrite_container(&grid.children, rest, edit)?;
            Ok(update_at(list, index, Block::Grid(grid.with_children(children))))
        }
    }
}
