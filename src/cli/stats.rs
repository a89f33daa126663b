use conceptfeed::session::Session;

/// Display profile statistics in the terminal.
pub fn profile(session: &Session) {
    let stats = session.profile_stats();

    println!("Profile");
    println!("{}", "=".repeat(40));
    println!("  Concepts:            {}", stats.concepts);
    println!("  Saved:               {}", stats.bookmarks);
    println!("  Created:             {}", stats.authored);
    println!();

    println!("By Level:");
    let catalog = session.content.concepts();
    for level in 1..=3u8 {
        let count = catalog.iter().filter(|c| c.difficulty_level == level).count();
        let name = conceptfeed::content::types::Level::from_difficulty(level);
        println!("  {:<14} {}", name.as_str(), count);
    }
}
