//! Approximate quote lookup by free-text hint.
//!
//! An alternative to random sampling for when a user half-remembers a quote:
//! every eligible record is scored by token-set similarity against the hint
//! and the best match wins. This path never consults or mutates the rotation
//! seen-set.

use std::collections::HashSet;

use super::error::{StoreError, StoreResult};
use super::quotes::QuoteStore;
use super::types::QuoteRecord;

/// The eligible record whose text best matches `hint`.
///
/// Ties keep the first-encountered record, so results are stable across
/// calls. Fails with [`StoreError::EmptyPool`] when the author has no quotes.
pub fn find_closest(store: &QuoteStore, name: &str, hint: &str) -> StoreResult<QuoteRecord> {
    let hint_tokens = tokenize(hint);

    let mut best: Option<(f64, QuoteRecord)> = None;
    for record in store.list_by_author(name)? {
        let text = record
            .lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let score = token_set_score(&hint_tokens, &tokenize(&text));
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, record));
        }
    }

    best.map(|(_, record)| record).ok_or(StoreError::EmptyPool)
}

/// Lower-cased alphanumeric tokens of `text`.
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sørensen–Dice coefficient over two token sets, in `[0.0, 1.0]`.
fn token_set_score(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let overlap = a.intersection(b).count();
    (2 * overlap) as f64 / (a.len() + b.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_store(dir: &TempDir, rows: &[&[&str]]) -> QuoteStore {
        let store = QuoteStore::new(dir.path().join("quotes.csv"));
        for row in rows {
            let fields: Vec<String> = row.iter().map(|s| s.to_string()).collect();
            store.add(&fields).unwrap();
        }
        store
    }

    #[test]
    fn tokenize_splits_on_punctuation() {
        let tokens = tokenize("Hello, world! Hello?");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("hello"));
        assert!(tokens.contains("world"));
    }

    #[test]
    fn identical_token_sets_score_one() {
        let a = tokenize("the same words");
        let b = tokenize("words the same");
        assert_eq!(token_set_score(&a, &b), 1.0);
    }

    #[test]
    fn disjoint_token_sets_score_zero() {
        let a = tokenize("apples");
        let b = tokenize("oranges");
        assert_eq!(token_set_score(&a, &b), 0.0);
    }

    #[test]
    fn empty_sets_score_zero() {
        assert_eq!(token_set_score(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn finds_best_matching_record() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(
            &dir,
            &[
                &["the mitochondria is the powerhouse of the cell", "alice"],
                &["never trust a penguin", "bob"],
            ],
        );

        let found = find_closest(&store, "random", "trust penguin").unwrap();
        assert_eq!(found.lines[0].author, "Bob");
    }

    #[test]
    fn respects_author_filter() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(
            &dir,
            &[
                &["never trust a penguin", "alice"],
                &["never trust a walrus", "bob"],
            ],
        );

        let found = find_closest(&store, "bob", "never trust a penguin").unwrap();
        assert_eq!(found.lines[0].author, "Bob");
    }

    #[test]
    fn no_quotes_is_empty_pool() {
        let dir = TempDir::new().unwrap();
        let store = QuoteStore::new(dir.path().join("quotes.csv"));
        let err = find_closest(&store, "random", "anything").unwrap_err();
        assert!(matches!(err, StoreError::EmptyPool));
    }
}
