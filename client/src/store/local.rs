use std::path::Path;

use memo_core::Note;
use rusqlite::Connection;

use super::StoreError;

/// On-device fallback store, used when the remote service is unreachable
///
/// Shares the schema with the server's store but no state; ids assigned
/// here are independent of remote ids.
pub struct LocalDb {
    conn: Connection,
}

impl LocalDb {
    /// Open or create the local database at the given path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = memo_core::open_db(path).map_err(local)?;

        Ok(Self { conn })
    }

    pub fn list(&self) -> Result<Vec<Note>, StoreError> {
        memo_core::list_notes(&self.conn).map_err(local)
    }

    pub fn insert(&self, content: &str) -> Result<Note, StoreError> {
        memo_core::insert_note(&self.conn, content).map_err(|e| match e {
            memo_core::StoreError::EmptyContent => StoreError::EmptyContent,
            memo_core::StoreError::Database(e) => local(e),
        })
    }

    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        memo_core::delete_note(&self.conn, id).map_err(local)
    }
}

fn local(err: rusqlite::Error) -> StoreError {
    StoreError::Local(err.to_string())
}
