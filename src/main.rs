mod cli;
mod config;
mod store;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bruhbot", version, about = "Quote and meme store for a personal chat bot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, add, or remove quotes
    Quote {
        #[command(subcommand)]
        action: QuoteAction,
    },
    /// Fetch, add, or remove memes
    Meme {
        #[command(subcommand)]
        action: MemeAction,
    },
    /// Show the contribution scoreboard
    Stats {
        /// Only show the N authors with the highest totals
        #[arg(long, conflicts_with = "authors")]
        top: Option<usize>,
        /// Only show the named authors
        #[arg(long, num_args = 1..)]
        authors: Vec<String>,
        /// Dump the raw author -> counts mapping as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum QuoteAction {
    /// Fetch the next unseen quote for an author ("random" for anyone)
    Get {
        #[arg(default_value = "random")]
        author: String,
        /// Return the quote closest to this text instead of sampling
        #[arg(long)]
        hint: Option<String>,
    },
    /// Add a quote as alternating "text" author fields
    Add {
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Remove every quote matching the given field prefix
    Remove {
        #[arg(required = true)]
        fields: Vec<String>,
    },
}

#[derive(Subcommand)]
enum MemeAction {
    /// Fetch the next unseen meme for an author ("random" for anyone)
    Get {
        #[arg(default_value = "random")]
        author: String,
        /// Fetch a specific meme by filename instead of sampling
        #[arg(long)]
        name: Option<String>,
    },
    /// Save an image file as a meme for an author
    Add {
        author: String,
        /// Source image; its extension is kept on the stored file
        file: PathBuf,
        /// Name to store the meme under (defaults to the source file's stem)
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete one of an author's memes by filename stem
    Delete { author: String, name: String },
    /// List an author's meme filenames
    List { author: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level and storage paths)
    let config = config::BruhBotConfig::load()?;

    // Initialize tracing with the configured log level. Log to stderr so
    // stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.bot.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Quote { action } => match action {
            QuoteAction::Get { author, hint } => {
                cli::quote::get(&config, &author, hint.as_deref())?;
            }
            QuoteAction::Add { fields } => {
                cli::quote::add(&config, &fields)?;
            }
            QuoteAction::Remove { fields } => {
                cli::quote::remove(&config, &fields)?;
            }
        },
        Command::Meme { action } => match action {
            MemeAction::Get { author, name } => {
                cli::meme::get(&config, &author, name.as_deref())?;
            }
            MemeAction::Add { author, file, name } => {
                cli::meme::add(&config, &author, &file, name.as_deref())?;
            }
            MemeAction::Delete { author, name } => {
                cli::meme::delete(&config, &author, &name)?;
            }
            MemeAction::List { author } => {
                cli::meme::list(&config, &author)?;
            }
        },
        Command::Stats { top, authors, json } => {
            cli::stats::run(&config, top, &authors, json)?;
        }
    }

    Ok(())
}
