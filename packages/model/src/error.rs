use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}
