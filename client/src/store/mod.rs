pub mod local;
pub mod remote;

pub use local::LocalDb;
pub use remote::RemoteStore;

use thiserror::Error;

/// Failure taxonomy for store operations, driving the fallback decision
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected before any store call; surfaced directly to the user
    #[error("note content cannot be empty")]
    EmptyContent,

    /// Remote network failure, timeout, or non-success response; absorbed
    /// by the fallback transition rather than surfaced as a hard error
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    /// Local store failure; the one path with no further fallback
    #[error("local store failure: {0}")]
    Local(String),
}
