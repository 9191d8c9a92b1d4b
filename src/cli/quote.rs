use anyhow::Result;

use super::SessionState;
use crate::config::BruhBotConfig;
use crate::store::error::StoreError;
use crate::store::quotes::QuoteStore;
use crate::store::search;
use crate::store::types::QuoteRecord;

/// Print the next unseen quote for an author, or the closest match to a hint.
pub fn get(config: &BruhBotConfig, author: &str, hint: Option<&str>) -> Result<()> {
    let store = QuoteStore::new(config.resolved_quotes_path());

    let picked = if let Some(hint) = hint {
        // The fuzzy path bypasses rotation entirely.
        search::find_closest(&store, author, hint)
    } else {
        let state_path = config.resolved_state_path();
        let mut state = SessionState::load(&state_path)?;
        let picked = store.get_next(author, &mut state.quotes);
        if picked.is_ok() {
            state.save(&state_path)?;
        }
        picked
    };

    match picked {
        Ok(record) => {
            print_record(&record);
            Ok(())
        }
        Err(StoreError::EmptyPool) => {
            println!("{author} not found in the store. Add some quotes for them!");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Add one record given as alternating "quote" author fields.
pub fn add(config: &BruhBotConfig, fields: &[String]) -> Result<()> {
    let store = QuoteStore::new(config.resolved_quotes_path());
    match store.add(fields) {
        Ok(_) => {
            println!("Successfully added quote to the store for future usage.");
            Ok(())
        }
        Err(StoreError::MalformedInput(reason)) => {
            println!("Malformed quote ({reason}); use the form \"quote\" author \"quote\" author...");
            Ok(())
        }
        Err(StoreError::DuplicateRecord) => {
            println!("This quote already exists in the store, no need to add it again.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Remove every record matching the given field prefix.
pub fn remove(config: &BruhBotConfig, fields: &[String]) -> Result<()> {
    let store = QuoteStore::new(config.resolved_quotes_path());
    match store.remove(fields) {
        Ok(removed) => {
            println!("Removed {removed} quote(s) from the store.");
            Ok(())
        }
        Err(StoreError::MalformedInput(reason)) => {
            println!("Cannot delete: {reason}.");
            Ok(())
        }
        Err(StoreError::NotFound) => {
            println!("Quote was not found in the store, are you sure it is correct?");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_record(record: &QuoteRecord) {
    for line in &record.lines {
        println!("\"{}\"", line.text);
        println!("  - {}", line.author);
    }
}
