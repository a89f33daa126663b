//! Document database upgrades.
//!
//! The version row in `schema_meta` records how far a database has been
//! upgraded; [`run_migrations`] steps it one version at a time until it
//! reaches [`CURRENT_SCHEMA_VERSION`]. Migrations never run backwards.

use rusqlite::Connection;

/// Version written by this build after all migrations have run.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Reads the recorded version. An unparsable value reads as 0.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'schema_version'",
        [],
        |row| {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().unwrap_or(0))
        },
    )
}

fn update_schema_version(conn: &Connection, version: u32) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE schema_meta SET value = ?1 WHERE key = 'schema_version'",
        [version.to_string()],
    )?;
    Ok(())
}

/// Upgrade the database, one transaction per version step.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    let mut version = get_schema_version(conn)?;
    tracing::debug!(schema_version = version, target = CURRENT_SCHEMA_VERSION, "checking migrations");

    while version < CURRENT_SCHEMA_VERSION {
        let next = version + 1;
        tracing::info!(from = version, to = next, "running migration");

        let tx = conn.unchecked_transaction()?;
        match next {
            2 => migrate_v1_to_v2(&tx)?,
            _ => {
                tracing::error!(version = next, "unknown migration target");
                break;
            }
        }
        update_schema_version(&tx, next)?;
        tx.commit()?;

        version = next;
    }

    Ok(())
}

/// Migration v1 → v2: track the byte size of each stored document.
fn migrate_v1_to_v2(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "ALTER TABLE documents ADD COLUMN size_bytes INTEGER NOT NULL DEFAULT 0;
         UPDATE documents SET size_bytes = length(CAST(body AS BLOB));",
    )
}
