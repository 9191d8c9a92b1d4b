use std::path::Path;

use anyhow::{Context, Result};

use super::SessionState;
use crate::config::BruhBotConfig;
use crate::store::error::StoreError;
use crate::store::memes::MemeStore;

/// Print the path of the next unseen meme for an author, or of one requested
/// by name.
pub fn get(config: &BruhBotConfig, author: &str, name: Option<&str>) -> Result<()> {
    let store = MemeStore::new(config.resolved_memes_dir());

    let picked = if let Some(name) = name {
        store.fetch(author, name)
    } else {
        let state_path = config.resolved_state_path();
        let mut state = SessionState::load(&state_path)?;
        let picked = store.get_next(author, &mut state.memes);
        if picked.is_ok() {
            state.save(&state_path)?;
        }
        picked
    };

    match picked {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(StoreError::AuthorNotFound(_) | StoreError::EmptyPool) => {
            println!("{author} has no memes associated with them. Add some!");
            Ok(())
        }
        Err(StoreError::NotFound) => {
            println!("This meme does not exist in the store, check the name with `meme list`.");
            Ok(())
        }
        Err(StoreError::MalformedInput(reason)) => {
            println!("Cannot complete that request: {reason}.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Store the bytes of `file` as a new meme for `author`.
///
/// The stored name defaults to the source file's stem; the extension is
/// always inferred from the source file.
pub fn add(config: &BruhBotConfig, author: &str, file: &Path, name: Option<&str>) -> Result<()> {
    let store = MemeStore::new(config.resolved_memes_dir());

    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let source_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let requested = match name {
        Some(name) => name.to_string(),
        None => file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    match store.save(author, &bytes, &requested, &source_name) {
        Ok(id) => {
            println!("Meme saved as {id} for future usage.");
            Ok(())
        }
        Err(StoreError::DuplicateName(stem)) => {
            println!("Filename '{stem}' for {author} is already taken, try again!");
            Ok(())
        }
        Err(StoreError::MalformedInput(reason)) => {
            println!("Cannot save that meme: {reason}.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Delete one meme by author and filename stem.
pub fn delete(config: &BruhBotConfig, author: &str, name: &str) -> Result<()> {
    let store = MemeStore::new(config.resolved_memes_dir());
    match store.delete(author, name) {
        Ok(removed) => {
            println!("Meme {removed} was removed from {author}'s folder.");
            Ok(())
        }
        Err(StoreError::AuthorNotFound(author)) => {
            println!("{author} doesn't exist in the store, so there is nothing to remove.");
            Ok(())
        }
        Err(StoreError::NotFound) => {
            println!("Meme was not present in {author}'s folder, are you sure the name is right?");
            Ok(())
        }
        Err(StoreError::MalformedInput(reason)) => {
            println!("Cannot delete: {reason}.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// List an author's meme filenames.
pub fn list(config: &BruhBotConfig, author: &str) -> Result<()> {
    let store = MemeStore::new(config.resolved_memes_dir());
    match store.list_names(author) {
        Ok(names) if names.is_empty() => {
            println!("{author} has no memes yet.");
            Ok(())
        }
        Ok(names) => {
            println!("All memes associated with {author}:");
            for name in names {
                println!("  {name}");
            }
            Ok(())
        }
        Err(StoreError::AuthorNotFound(_) | StoreError::EmptyPool) => {
            println!("This author does not exist in the store, so they have no memes!");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
