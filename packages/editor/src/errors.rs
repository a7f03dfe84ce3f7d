//! Error types for the editor

use folio_model::BlockKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("A save is already in progress")]
    SaveInProgress,
}

/// Form input that cannot become a well-formed block.
///
/// Raised at the input boundary only; a rejected form leaves the tree as it
/// was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Field {field} must be a positive integer, got {value:?}")]
    NotPositive { field: &'static str, value: String },

    #[error("Field {field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Field {field} does not accept {value:?}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("Column span {span} exceeds grid size {max}")]
    ColumnSpanOutOfRange { span: u32, max: u32 },

    #[error("Form for {form} cannot edit a {block} block")]
    KindMismatch { form: BlockKind, block: BlockKind },
}
