use crate::error::StoreError;
use crate::models::Note;
use crate::schema;
use rusqlite::{params, Connection};
use std::path::Path;

/// Open or create a notes database at the specified path
pub fn open_db(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Get all notes, newest first
///
/// Ties on `created_at` (same-millisecond inserts) fall back to id order so
/// the result is stable across calls.
pub fn list_notes(conn: &Connection) -> Result<Vec<Note>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, content, created_at FROM notes ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Note {
            id: row.get(0)?,
            content: row.get(1)?,
            created_at: row.get(2)?,
        })
    })?;

    let mut notes = Vec::new();
    for note in rows {
        notes.push(note?);
    }

    Ok(notes)
}

/// Create a new note
///
/// Content is trimmed before storage; empty or whitespace-only content is
/// rejected without touching the database.
pub fn insert_note(conn: &Connection, content: &str) -> Result<Note, StoreError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(StoreError::EmptyContent);
    }

    let now = chrono::Utc::now().timestamp_millis();

    conn.execute(
        "INSERT INTO notes (content, created_at) VALUES (?1, ?2)",
        params![content, now],
    )?;

    Ok(Note {
        id: conn.last_insert_rowid(),
        content: content.to_string(),
        created_at: now,
    })
}

/// Delete a note by id
///
/// Returns false when no row matched; "no such id" is not an error.
pub fn delete_note(conn: &Connection, id: i64) -> Result<bool, rusqlite::Error> {
    let affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}
