//! # Folio Workspace
//!
//! Ties the editing engine to persistence: page storage backends, the
//! workspace config file, logging setup and the page lifecycle (create,
//! open, save, publish, preview, delete).
//!
//! ```text
//! Workspace ──open──▶ EditSession ──begin_save──▶ SaveTicket
//!     │                                              │
//!     └──────────── PageStorage::write ◀─────────────┘
//! ```

pub mod config;
pub mod logging;
pub mod storage;
mod workspace;

pub use config::{Config, ConfigError, DEFAULT_CONFIG_NAME};
pub use storage::{FileStorage, MemoryStorage, PageRecord, PageStorage, StorageError};
pub use workspace::{Workspace, WorkspaceError};
