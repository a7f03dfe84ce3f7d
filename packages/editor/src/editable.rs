//! # Editable Rendering
//!
//! Builds an interactive view of the block tree. Every node comes with a
//! handle that can rewrite it, and every handle yields a complete new root
//! list for the session to commit.
//!
//! ## Update continuations
//!
//! There are no parent pointers. Each container handle carries a `commit`
//! continuation: "given my new child list, produce the new root". The root's
//! continuation is the identity. A grid's children get a continuation that
//! wraps the new children into a new grid and hands it to the grid's own
//! node handle, which in turn calls its container's continuation:
//!
//! ```text
//! leaf.update(b)
//!   → grid children commit(update_at(children, i, b))
//!   → grid node update(Grid { children, .. })
//!   → root commit(update_at(root, j, grid))
//!   → new root
//! ```
//!
//! Handles are cheap to clone (`Rc`) and are snapshots: after a commit the
//! tree should be rendered again from the new root.

use crate::creator::{apply_edit, new_block, BlockForm, EditForm};
use crate::tree_ops::{delete_at, insert_at, move_to, update_at};
use crate::{SpanPolicy, ValidationError};
use folio_model::layout::grid_columns;
use folio_model::Block;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

type Commit = Rc<dyn Fn(Vec<Block>) -> Vec<Block>>;

/// Handle on one container's child list
#[derive(Clone)]
pub struct ListHandle {
    list: Rc<Vec<Block>>,
    commit: Commit,
    /// Size of the grid owning this list; `None` at the root
    parent_size: Option<u32>,
}

/// Handle on one block, addressed by its index in a container
#[derive(Clone)]
pub struct NodeHandle {
    container: ListHandle,
    index: usize,
}

impl ListHandle {
    /// Handle on the root list
    pub fn root(blocks: &[Block]) -> Self {
        Self {
            list: Rc::new(blocks.to_vec()),
            commit: Rc::new(|blocks| blocks),
            parent_size: None,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn parent_size(&self) -> Option<u32> {
        self.parent_size
    }

    /// Replace this container's list and return the new root
    pub fn replace(&self, blocks: Vec<Block>) -> Vec<Block> {
        (self.commit)(blocks)
    }

    pub fn insert(&self, index: usize, block: Block) -> Vec<Block> {
        self.replace(insert_at(&self.list, index, block))
    }

    /// Validate `form` and insert the resulting block at `position`
    pub fn create(&self, position: usize, form: &BlockForm) -> Result<Vec<Block>, ValidationError> {
        let block = new_block(&self.list, position, form)?;
        Ok(self.insert(position, block))
    }

    /// Insert at the end, the position offered by a container's own menu
    pub fn append(&self, form: &BlockForm) -> Result<Vec<Block>, ValidationError> {
        self.create(self.list.len(), form)
    }

    pub fn move_block(&self, from: usize, to: usize) -> Vec<Block> {
        self.replace(move_to(&self.list, from, to))
    }

    pub fn node(&self, index: usize) -> NodeHandle {
        assert!(
            index < self.list.len(),
            "node index {} out of range for list of length {}",
            index,
            self.list.len()
        );
        NodeHandle {
            container: self.clone(),
            index,
        }
    }
}

impl NodeHandle {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn block(&self) -> &Block {
        &self.container.list[self.index]
    }

    pub fn update(&self, block: Block) -> Vec<Block> {
        self.container
            .replace(update_at(&self.container.list, self.index, block))
    }

    pub fn delete(&self) -> Vec<Block> {
        self.container
            .replace(delete_at(&self.container.list, self.index))
    }

    pub fn insert_before(&self, form: &BlockForm) -> Result<Vec<Block>, ValidationError> {
        self.container.create(self.index, form)
    }

    pub fn insert_after(&self, form: &BlockForm) -> Result<Vec<Block>, ValidationError> {
        self.container.create(self.index + 1, form)
    }

    /// Apply an edit form; the block keeps its id
    pub fn edit(&self, form: &EditForm, policy: SpanPolicy) -> Result<Vec<Block>, ValidationError> {
        let updated = apply_edit(self.block(), form, self.container.parent_size, policy)?;
        Ok(self.update(updated))
    }

    /// Column span bounds, when this block sits directly in a grid
    pub fn span_hint(&self) -> Option<RangeInclusive<u32>> {
        self.container.parent_size.map(SpanPolicy::hint)
    }

    /// Handle on a grid's children; `None` for leaf blocks
    pub fn children(&self) -> Option<ListHandle> {
        let Block::Grid(grid) = self.block() else {
            return None;
        };

        let grid = grid.clone();
        let node = self.clone();
        let list = Rc::new(grid.children.clone());
        let parent_size = Some(grid.size);

        Some(ListHandle {
            list,
            commit: Rc::new(move |children| node.update(Block::Grid(grid.with_children(children)))),
            parent_size,
        })
    }
}

impl fmt::Debug for ListHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHandle")
            .field("len", &self.list.len())
            .field("parent_size", &self.parent_size)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("index", &self.index)
            .field("id", &self.block().id())
            .finish()
    }
}

/// One rendered block with its edit handle
#[derive(Debug, Clone)]
pub struct EditableNode {
    pub handle: NodeHandle,
    /// Present for grids
    pub children: Option<EditableList>,
}

/// A rendered container: its handle plus its rendered children in order
#[derive(Debug, Clone)]
pub struct EditableList {
    pub handle: ListHandle,
    /// Effective column count (1 at the root and for unsupported grid sizes)
    pub columns: u32,
    pub nodes: Vec<EditableNode>,
}

impl EditableNode {
    pub fn block(&self) -> &Block {
        self.handle.block()
    }

    pub fn index(&self) -> usize {
        self.handle.index()
    }
}

impl EditableList {
    /// Find a rendered node by block id, searching nested grids too
    pub fn find(&self, id: &str) -> Option<&EditableNode> {
        for node in &self.nodes {
            if node.block().id() == id {
                return Some(node);
            }
            if let Some(found) = node.children.as_ref().and_then(|c| c.find(id)) {
                return Some(found);
            }
        }
        None
    }
}

/// Render the whole tree in editable mode
pub fn render_editable(blocks: &[Block]) -> EditableList {
    render_list(ListHandle::root(blocks))
}

fn render_list(handle: ListHandle) -> EditableList {
    let columns = handle.parent_size.map(grid_columns).unwrap_or(1);
    let nodes = (0..handle.len())
        .map(|index| {
            let node = handle.node(index);
            let children = node.children().map(render_list);
            EditableNode {
                handle: node,
                children,
            }
        })
        .collect();

    EditableList {
        handle,
        columns,
        nodes,
    }
}
