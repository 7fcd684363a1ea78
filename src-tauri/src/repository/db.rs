//! Database Connection and Setup
//!
//! Opens the SQLite file and creates its schema.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared connection handed to repositories
pub type DbConn = Arc<Mutex<Connection>>;

/// Open (or create) the database at `db_path`. `:memory:` opens a private
/// in-memory database.
pub fn init_db(db_path: &Path) -> Result<DbConn, String> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    create_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Create the schema if missing
fn create_schema(conn: &Connection) -> Result<(), String> {
    // One JSON document per food; seq preserves arrival order
    conn.execute(
        "CREATE TABLE IF NOT EXISTS foods (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            doc TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .map_err(|e| format!("Failed to create schema: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(conn: &Connection) -> Vec<String> {
        let mut stmt = conn.prepare("PRAGMA table_info(foods)").unwrap();
        let names = stmt.query_map([], |row| row.get::<_, String>(1)).unwrap();
        names.map(|n| n.unwrap()).collect()
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.db");
        {
            let conn = init_db(&path).unwrap();
            let conn = conn.lock().await;
            conn.execute("INSERT INTO foods (id, doc) VALUES ('a', '{}')", [])
                .unwrap();
        }

        let conn = init_db(&path).unwrap();
        let conn = conn.lock().await;
        assert_eq!(columns(&conn), vec!["seq", "id", "doc", "updated_at"]);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
