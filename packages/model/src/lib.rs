//! # Folio Model
//!
//! Block tree data model shared by the editor, the HTML compiler and storage.
//!
//! ```text
//! Snapshot
//!  ├── Settings   (title, description, page width, favicon)
//!  └── blocks: [Block]
//!        Text | Image | Button | VerticalSpace
//!        Grid { size, children: [Block] }
//! ```
//!
//! Every consumer matches `Block` exhaustively, so adding a variant is a
//! compile error everywhere it needs handling.

mod block;
mod error;
pub mod id;
pub mod layout;
mod settings;
mod snapshot;
pub mod visitor;

pub use block::{
    Align, Block, BlockKind, ButtonBlock, GridBlock, ImageBlock, ImageHeight, ImageWidth,
    TextBlock, TextSize, VerticalSpaceBlock,
};
pub use error::SnapshotError;
pub use id::block_id;
pub use settings::{PageSize, Settings};
pub use snapshot::{slugify, Snapshot};
pub use visitor::{SpanViolation, Visitor};
