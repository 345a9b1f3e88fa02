//! Database Connection and Setup
//!
//! Opens the SQLite file and makes sure the schema exists.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::DomainResult;

/// Path that opens a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Database state wrapper
///
/// Owns the single connection; repositories share it through `connection()`.
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
}

impl DbState {
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}

/// Initialize database with path
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    if db_path != Path::new(IN_MEMORY) {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)?;
    run_migrations(&conn)?;
    log::debug!("Database ready at {}", db_path.display());

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todo_list (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            is_completed INTEGER NOT NULL DEFAULT 0,
            due_date INTEGER
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todo_list_open ON todo_list(is_completed, due_date)",
        [],
    )?;

    Ok(())
}
