mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use conceptfeed::config::FeedConfig;

#[derive(Parser)]
#[command(name = "conceptfeed", version, about = "Swipeable concept feed with bookmarks, reactions and likes")]
struct Cli {
    /// Config file (defaults to ~/.conceptfeed/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep interaction state in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current feed window
    Feed {
        /// Grow the window this many times before printing
        #[arg(long, default_value_t = 0)]
        more: usize,
    },
    /// Resolve a feed-item id (or canonical id) and print the concept
    Show { id: String },
    /// Toggle a bookmark
    Bookmark { id: String },
    /// List saved concepts
    Bookmarks,
    /// React to a concept (mind_blown, got_it, confused, love_it)
    React { id: String, kind: String },
    /// Show reaction tallies for a concept
    Reactions { id: String },
    /// Toggle a like
    Like { id: String },
    /// Pick a random concept
    Random,
    /// Show the concept of the day
    Daily,
    /// Author a new concept
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        desc: String,
        #[arg(long)]
        code: String,
        /// basic, intermediate or advanced
        #[arg(long, default_value = "basic")]
        level: String,
    },
    /// List concepts you authored
    Mine,
    /// Delete one of your authored concepts
    Remove { id: String },
    /// Show profile statistics
    Profile,
    /// Check remote reachability and local storage health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FeedConfig::load_from(path)?,
        None => FeedConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if matches!(cli.command, Command::Doctor) {
        return cli::doctor::doctor(&config).await;
    }

    let session = cli::open_session(&config, cli.ephemeral).await?;

    match cli.command {
        Command::Feed { more } => cli::feed::feed(&session, more).await?,
        Command::Show { id } => cli::feed::show(&session, &id).await?,
        Command::Bookmark { id } => cli::interact::bookmark(&session, &id).await,
        Command::Bookmarks => cli::interact::bookmarks(&session),
        Command::React { id, kind } => cli::interact::react(&session, &id, &kind).await?,
        Command::Reactions { id } => cli::interact::reactions(&session, &id),
        Command::Like { id } => cli::interact::like(&session, &id).await?,
        Command::Random => cli::feed::random(&session),
        Command::Daily => cli::feed::daily(&session),
        Command::Create {
            title,
            desc,
            code,
            level,
        } => cli::authoring::create(&session, title, desc, code, &level).await?,
        Command::Mine => cli::authoring::mine(&session),
        Command::Remove { id } => cli::authoring::remove(&session, &id).await?,
        Command::Profile => cli::stats::profile(&session),
        // handled before the session opens
        Command::Doctor => {}
    }

    Ok(())
}
