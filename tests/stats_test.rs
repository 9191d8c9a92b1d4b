mod helpers;

use bruhbot::store::stats::{compute, Contribution};
use helpers::{meme_store, quote_store, seed_meme, seed_quotes};
use tempfile::TempDir;

#[test]
fn counts_quotes_and_memes_per_author() {
    // Quotes: Alice x2, Bob x1. Memes: alice/ with 3 files.
    let dir = TempDir::new().unwrap();
    let quotes = quote_store(&dir);
    let memes = meme_store(&dir);
    seed_quotes(
        &quotes,
        &[&["one", "alice"], &["two", "alice"], &["solo", "bob"]],
    );
    for stem in ["a", "b", "c"] {
        seed_meme(&memes, "alice", stem);
    }

    let board = compute(&quotes, &memes).unwrap();
    assert_eq!(
        board.get("Alice").unwrap(),
        Contribution { quotes: 2, memes: 3 }
    );
    assert_eq!(
        board.get("Bob").unwrap(),
        Contribution { quotes: 1, memes: 0 }
    );
}

#[test]
fn meme_only_author_appears_on_the_board() {
    let dir = TempDir::new().unwrap();
    let quotes = quote_store(&dir);
    let memes = meme_store(&dir);
    seed_meme(&memes, "carol", "only");

    let board = compute(&quotes, &memes).unwrap();
    assert_eq!(
        board.get("Carol").unwrap(),
        Contribution { quotes: 0, memes: 1 }
    );
}

#[test]
fn meme_directory_keys_align_with_quote_keys() {
    // Directory names are lower-case on disk but title-cased in the board,
    // so both sources land on the same entry.
    let dir = TempDir::new().unwrap();
    let quotes = quote_store(&dir);
    let memes = meme_store(&dir);
    seed_quotes(&quotes, &[&["said once", "Alice"]]);
    seed_meme(&memes, "ALICE", "grin");

    let board = compute(&quotes, &memes).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(
        board.get("Alice").unwrap(),
        Contribution { quotes: 1, memes: 1 }
    );
}

#[test]
fn multi_line_exchanges_count_every_author_position() {
    let dir = TempDir::new().unwrap();
    let quotes = quote_store(&dir);
    let memes = meme_store(&dir);
    seed_quotes(&quotes, &[&["hi", "alice", "hi yourself", "bob"]]);

    let board = compute(&quotes, &memes).unwrap();
    assert_eq!(board.get("Alice").unwrap().quotes, 1);
    assert_eq!(board.get("Bob").unwrap().quotes, 1);
}

#[test]
fn scoreboard_serializes_for_the_rendering_layer() {
    let dir = TempDir::new().unwrap();
    let quotes = quote_store(&dir);
    let memes = meme_store(&dir);
    seed_quotes(&quotes, &[&["one", "alice"]]);

    let board = compute(&quotes, &memes).unwrap();
    let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&board).unwrap()).unwrap();
    assert_eq!(json["Alice"]["quotes"], 1);
    assert_eq!(json["Alice"]["memes"], 0);
}
