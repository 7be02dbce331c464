#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod db;
pub mod error;
pub mod models;
pub mod schema;

// Re-export commonly used types
pub use db::{delete_note, insert_note, list_notes, open_db};
pub use error::StoreError;
pub use models::{AddNoteRequest, DeleteResponse, Note, NoteEvent};
