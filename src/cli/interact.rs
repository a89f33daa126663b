//! CLI interaction commands: bookmarks, reactions, likes.

use anyhow::{anyhow, Result};

use conceptfeed::interactions::reactions::ReactionKind;
use conceptfeed::session::Session;

use super::summary_line;

pub async fn bookmark(session: &Session, id: &str) {
    if session.toggle_bookmark(id).await {
        println!("Saved {id}");
    } else {
        println!("Removed {id} from saved");
    }
}

pub fn bookmarks(session: &Session) {
    let saved = session.saved_concepts();
    if saved.is_empty() {
        println!("Nothing saved yet.");
        return;
    }
    for concept in &saved {
        println!("{}", summary_line(concept));
    }
}

pub async fn react(session: &Session, id: &str, kind: &str) -> Result<()> {
    let kind: ReactionKind = kind.parse().map_err(|e: String| anyhow!(e))?;
    let record = session.react(id, kind).await;
    println!("Reacted {kind} to {id} ({} total)", record.count(kind));
    Ok(())
}

pub fn reactions(session: &Session, id: &str) {
    let record = session.reactions_for(id);
    for kind in ReactionKind::ALL {
        let mark = if record.active == Some(kind) { "*" } else { " " };
        println!("{mark} {:<12} {}", kind.as_str(), record.count(kind));
    }
}

pub async fn like(session: &Session, id: &str) -> Result<()> {
    if let Err(e) = session.likes.fetch_count(&conceptfeed::feed::canonical_id_of(id)).await {
        tracing::debug!(error = %e, "like counter unavailable");
    }
    let toggled = session.toggle_like(id);
    let verb = if toggled.state.liked { "Liked" } else { "Unliked" };
    println!("{verb} {id} ({} likes)", toggled.state.display_count());

    // The process exits right after; let the request finish first.
    toggled.request.await?;
    Ok(())
}
