#![allow(dead_code)]

use bruhbot::store::memes::MemeStore;
use bruhbot::store::quotes::QuoteStore;
use tempfile::TempDir;

/// A quote store backed by a file inside the temp dir.
pub fn quote_store(dir: &TempDir) -> QuoteStore {
    QuoteStore::new(dir.path().join("quotes.csv"))
}

/// A meme store rooted inside the temp dir.
pub fn meme_store(dir: &TempDir) -> MemeStore {
    MemeStore::new(dir.path().join("memes"))
}

/// Owned field list from string literals.
pub fn fields(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Add each row to the store through the normal add path.
pub fn seed_quotes(store: &QuoteStore, rows: &[&[&str]]) {
    for row in rows {
        store.add(&fields(row)).unwrap();
    }
}

/// Save a tiny placeholder image under `author/stem.png`.
pub fn seed_meme(store: &MemeStore, author: &str, stem: &str) {
    store
        .save(author, b"not really a png", stem, "source.png")
        .unwrap();
}
