use anyhow::Result;

use crate::config::BruhBotConfig;
use crate::store::memes::MemeStore;
use crate::store::quotes::QuoteStore;
use crate::store::stats;

/// Display the contribution scoreboard in the terminal.
///
/// `top` limits output to the N highest totals; `authors` limits it to the
/// named people; `json` dumps the raw mapping for the rendering layer.
pub fn run(
    config: &BruhBotConfig,
    top: Option<usize>,
    authors: &[String],
    json: bool,
) -> Result<()> {
    let quotes = QuoteStore::new(config.resolved_quotes_path());
    let memes = MemeStore::new(config.resolved_memes_dir());
    let board = stats::compute(&quotes, &memes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let rows = if let Some(n) = top {
        board.top(n)
    } else if !authors.is_empty() {
        board.select(authors)
    } else {
        board.ranked()
    };

    if rows.is_empty() {
        println!("No contributions recorded yet.");
        return Ok(());
    }

    println!("Bruh Bot Scoreboard");
    println!("{}", "=".repeat(40));
    println!("  {:<20} {:>7} {:>7}", "Author", "Quotes", "Memes");
    for (name, contribution) in rows {
        println!(
            "  {:<20} {:>7} {:>7}",
            name, contribution.quotes, contribution.memes
        );
    }

    Ok(())
}
