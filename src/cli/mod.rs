pub mod authoring;
pub mod doctor;
pub mod feed;
pub mod interact;
pub mod stats;

use anyhow::{Context, Result};
use std::sync::Arc;

use conceptfeed::config::FeedConfig;
use conceptfeed::content::types::Concept;
use conceptfeed::db::documents::{DocumentKeys, DocumentStore, MemoryDocumentStore, SqliteDocumentStore};
use conceptfeed::remote::http::HttpContentService;
use conceptfeed::remote::RemoteContentService;
use conceptfeed::session::{Session, SessionParts};

/// Open the document database and the remote client, then load a session.
pub async fn open_session(config: &FeedConfig, ephemeral: bool) -> Result<Session> {
    let documents: Arc<dyn DocumentStore> = if ephemeral {
        Arc::new(MemoryDocumentStore::new())
    } else {
        let db_path = config.resolved_db_path();
        let conn = conceptfeed::db::open_database(&db_path)?;
        Arc::new(SqliteDocumentStore::new(conn))
    };

    let remote: Arc<dyn RemoteContentService> = Arc::new(
        HttpContentService::new(&config.remote).context("failed to build HTTP client")?,
    );

    let session = Session::open(SessionParts {
        remote,
        documents,
        keys: DocumentKeys::with_prefix(&config.storage.key_prefix),
        sequencer: config.feed.clone(),
        user_id: config.remote.user_id,
    })
    .await;

    if session.content.is_empty() {
        eprintln!(
            "Catalog is empty (is {} reachable?). Authored content is still available.",
            config.remote.base_url
        );
    }
    Ok(session)
}

/// One-line summary used by list-style commands.
pub fn summary_line(concept: &Concept) -> String {
    format!(
        "{:<28} [{:<12}] {}",
        concept.id,
        concept.level().as_str(),
        concept.title
    )
}

/// Full concept card.
pub fn print_concept(concept: &Concept) {
    println!("{}", concept.title);
    println!("{}", "=".repeat(concept.title.chars().count().max(8)));
    println!("  id:          {}", concept.id);
    println!("  category:    {}", concept.category);
    println!("  level:       {}", concept.level());
    println!();
    println!("{}", concept.description);
    println!();
    println!("{}", concept.full_explanation);
    println!();
    println!("{}", concept.full_code);
}
