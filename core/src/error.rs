use thiserror::Error;

/// Errors produced by note store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Content was empty (or whitespace-only) after trimming.
    /// Rejected before any write reaches the store.
    #[error("note content cannot be empty")]
    EmptyContent,

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}
