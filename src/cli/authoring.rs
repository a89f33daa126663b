use anyhow::{anyhow, bail, Result};

use conceptfeed::content::types::{ConceptDraft, Level};
use conceptfeed::session::Session;

use super::summary_line;

/// Author a concept. The description doubles as the full explanation and the
/// code as both the short and full snippet.
pub async fn create(
    session: &Session,
    title: String,
    desc: String,
    code: String,
    level: &str,
) -> Result<()> {
    if title.trim().is_empty() || desc.trim().is_empty() || code.trim().is_empty() {
        bail!("title, desc and code must all be filled in");
    }
    let level: Level = level.parse().map_err(|e: String| anyhow!(e))?;

    let authored = session
        .author(ConceptDraft {
            title,
            full_explanation: desc.clone(),
            desc,
            full_code: code.clone(),
            short_code: code,
            level,
        })
        .await;

    println!("Created {}", authored.id);
    Ok(())
}

pub fn mine(session: &Session) {
    let authored = session.authored.list();
    if authored.is_empty() {
        println!("You have not created any concepts yet.");
        return;
    }
    for concept in &authored {
        println!("{}  {}", summary_line(&concept.to_concept()), concept.created_at);
    }
}

pub async fn remove(session: &Session, id: &str) -> Result<()> {
    if !session.remove_authored(id).await {
        bail!("no authored concept with id {id}");
    }
    println!("Removed {id}");
    Ok(())
}
