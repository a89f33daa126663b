//! CLI `doctor` command: probe the remote service and the local database.

use anyhow::{Context, Result};

use conceptfeed::config::FeedConfig;
use conceptfeed::db;
use conceptfeed::remote::http::HttpContentService;
use conceptfeed::remote::RemoteContentService;

pub async fn doctor(config: &FeedConfig) -> Result<()> {
    println!("Concept Feed Health Report");
    println!("==========================");
    println!();

    let remote = HttpContentService::new(&config.remote).context("failed to build HTTP client")?;
    println!("API:               {}", config.remote.base_url);
    match remote.health().await {
        Ok(()) => println!("Health endpoint:   OK"),
        Err(e) => println!("Health endpoint:   UNREACHABLE ({e})"),
    }
    match remote.fetch_all().await {
        Ok(concepts) => println!("Catalog:           {} concepts", concepts.len()),
        Err(e) => println!("Catalog:           FAILED ({e})"),
    }
    println!();

    let db_path = config.resolved_db_path();
    if !db_path.exists() {
        println!("Database:          not found at {}", db_path.display());
        println!("It is created on first use.");
        return Ok(());
    }

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;
    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("Database:          {}", db_path.display());
    println!("Schema version:    {}", report.schema_version);
    println!("Documents:         {}", report.document_count);
    println!("Document bytes:    {}", format_bytes(report.total_document_bytes));
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery: delete {} to start with empty bookmarks and reactions.", db_path.display());
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
