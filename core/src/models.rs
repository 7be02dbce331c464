use serde::{Deserialize, Serialize};

/// A note with all metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Store-assigned rowid (monotonic per store instance)
    pub id: i64,
    /// Note content (plain text), trimmed and non-empty
    pub content: String,
    /// Unix timestamp in milliseconds, assigned at insertion
    pub created_at: i64,
}

/// Change-notification wire event
///
/// Payloads are hints to refetch, never authoritative deltas: delivery is
/// best-effort and an event may be stale by the time it is handled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteEvent {
    /// Lifecycle hello sent once per subscription, diagnostics only
    Connected,
    NoteAdded { note: Note },
    NoteDeleted { id: i64 },
}

/// Body of `POST /notes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNoteRequest {
    pub content: String,
}

/// Body of a successful `DELETE /notes/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
