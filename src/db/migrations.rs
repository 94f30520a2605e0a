use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS state_snapshot (
            id        INTEGER PRIMARY KEY CHECK(id = 1),
            version   INTEGER NOT NULL,
            body      TEXT NOT NULL,
            saved_at  TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;
    Ok(())
}
