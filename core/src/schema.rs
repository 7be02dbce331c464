/// SQL schema for notes database (used by both the server and the client's
/// local fallback store)
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_created_at ON notes(created_at);

PRAGMA user_version = 1;
"#;

/// Get current schema version from database
pub fn get_schema_version(conn: &rusqlite::Connection) -> Result<i32, rusqlite::Error> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Set schema version in database
pub fn set_schema_version(
    conn: &rusqlite::Connection,
    version: i32,
) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "user_version", version)
}

/// Run migrations to bring database to current schema version
pub fn migrate(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    let mut version = get_schema_version(conn)?;

    if version == 0 {
        // Fresh database - apply v1 schema
        conn.execute_batch(SCHEMA_V1)?;
        version = 1;
    }

    // Version 1 is current
    if version == 1 {
        Ok(())
    } else {
        Err(rusqlite::Error::InvalidQuery)
    }
}
