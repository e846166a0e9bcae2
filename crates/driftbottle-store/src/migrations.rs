//! Schema setup for the bottles table.
//!
//! One table, indexed by rowid and by status. The status index only speeds
//! up the Adrift-set scan; correctness does not depend on it.

use rusqlite::Connection;

/// Creates the schema if it does not exist. Idempotent.
pub fn run(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS bottles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 0,
            sender INTEGER NOT NULL,
            sender_group INTEGER NOT NULL,
            picker INTEGER,
            picker_group INTEGER,
            created_at INTEGER,
            picked_at INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_bottles_status ON bottles(status);",
    )
}
