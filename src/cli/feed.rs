//! CLI feed browsing: window listing, resolution, random and daily picks.

use anyhow::Result;

use conceptfeed::resolver::Resolution;
use conceptfeed::session::Session;

use super::{print_concept, summary_line};

pub async fn feed(session: &Session, more: usize) -> Result<()> {
    for _ in 0..more {
        session.load_more().await;
    }

    let items = session.feed().await;
    println!(
        "Feed window: {} slots over {} concepts",
        session.window_size().await,
        session.content.len()
    );
    for item in &items {
        let mark = if session.is_bookmarked(item.canonical_id()) { "*" } else { " " };
        println!("{mark} {:<36} {}", item.id.to_string(), item.concept.title);
    }
    Ok(())
}

pub async fn show(session: &Session, id: &str) -> Result<()> {
    match session.resolve(id).await {
        Resolution::Found { concept, source } => {
            print_concept(&concept);
            println!();
            let reactions = session.reactions_for(&concept.id);
            println!("Resolved from:  {source}");
            println!("Bookmarked:     {}", session.is_bookmarked(&concept.id));
            if let Some(active) = reactions.active {
                println!("Your reaction:  {active}");
            }
            Ok(())
        }
        Resolution::NotFound { canonical_id } => {
            println!("Concept not found: {canonical_id}");
            println!("Go back to the feed (`conceptfeed feed`) and pick another one.");
            Ok(())
        }
    }
}

pub fn random(session: &Session) {
    match session.random() {
        Some(concept) => println!("{}", summary_line(&concept)),
        None => println!("No concepts loaded."),
    }
}

pub fn daily(session: &Session) {
    match session.daily() {
        Some(concept) => {
            println!("Concept of the day:");
            print_concept(&concept);
        }
        None => println!("No concepts loaded."),
    }
}
