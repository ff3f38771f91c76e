use imgproc_core::types::DbId;

/// Errors surfaced by the metadata store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The operation referenced an id with no matching row. Never
    /// silently treated as success.
    #[error("image record not found: id {id}")]
    NotFound { id: DbId },

    /// Connectivity or constraint failure from the underlying store.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}
