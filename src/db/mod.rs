pub mod documents;
pub mod migrations;
pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open (or create) the document database at the given path, with schema
/// initialized and migrations applied.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.busy_timeout(std::time::Duration::from_millis(5000))?;

    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open an in-memory database with schema and migrations applied.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;
    Ok(conn)
}

/// Summary produced by [`check_database_health`].
#[derive(Debug)]
pub struct HealthReport {
    pub schema_version: u32,
    pub document_count: u64,
    pub total_document_bytes: u64,
    pub integrity_ok: bool,
    pub integrity_details: String,
}

/// Run `PRAGMA integrity_check` and collect document statistics.
pub fn check_database_health(conn: &Connection) -> Result<HealthReport> {
    let schema_version = migrations::get_schema_version(conn)?;
    let (document_count, total_document_bytes): (i64, i64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(size_bytes), 0) FROM documents",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    let integrity_details: String =
        conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    Ok(HealthReport {
        schema_version,
        document_count: document_count.max(0) as u64,
        total_document_bytes: total_document_bytes.max(0) as u64,
        integrity_ok: integrity_details == "ok",
        integrity_details,
    })
}
