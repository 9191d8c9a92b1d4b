//! Statistics aggregation — the contribution scoreboard.
//!
//! A full recomputation on every request: one pass over the quote file and
//! one over the meme tree. Record counts are expected to stay in the
//! hundreds, so there is no incremental bookkeeping to get stale.

use std::collections::HashMap;

use serde::Serialize;

use super::error::StoreResult;
use super::memes::MemeStore;
use super::quotes::QuoteStore;
use super::title_case;

/// Per-author contribution counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub quotes: u64,
    pub memes: u64,
}

impl Contribution {
    pub fn total(&self) -> u64 {
        self.quotes + self.memes
    }
}

/// Author → contribution mapping, keyed by title-cased names so quote-derived
/// and meme-directory-derived entries land on the same key.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Scoreboard {
    entries: HashMap<String, Contribution>,
}

/// Build the scoreboard from both stores.
///
/// Every `" & "`-separated component of every author field counts one quote;
/// each author directory's file count becomes that author's meme count.
pub fn compute(quotes: &QuoteStore, memes: &MemeStore) -> StoreResult<Scoreboard> {
    let mut entries: HashMap<String, Contribution> = HashMap::new();

    for record in quotes.load_all()? {
        for line in &record.lines {
            for name in line.author.split(" & ") {
                entries.entry(title_case(name)).or_default().quotes += 1;
            }
        }
    }

    for author in memes.list_authors()? {
        let count = memes.list_names(&author)?.len() as u64;
        entries.entry(title_case(&author)).or_default().memes = count;
    }

    Ok(Scoreboard { entries })
}

impl Scoreboard {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up one author by title-cased key.
    pub fn get(&self, author: &str) -> Option<Contribution> {
        self.entries.get(author).copied()
    }

    /// All entries, highest total contribution first. Ties break
    /// alphabetically so output is stable.
    pub fn ranked(&self) -> Vec<(&str, Contribution)> {
        let mut ranked: Vec<(&str, Contribution)> = self
            .entries
            .iter()
            .map(|(name, contribution)| (name.as_str(), *contribution))
            .collect();
        ranked.sort_by(|a, b| b.1.total().cmp(&a.1.total()).then(a.0.cmp(b.0)));
        ranked
    }

    /// The `n` authors with the highest total contribution.
    pub fn top(&self, n: usize) -> Vec<(&str, Contribution)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// Only the requested authors, matched case-insensitively, in ranked
    /// order. Unknown names are silently absent from the result — the caller
    /// decides whether that is worth reporting.
    pub fn select(&self, names: &[String]) -> Vec<(&str, Contribution)> {
        let wanted: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        self.ranked()
            .into_iter()
            .filter(|(name, _)| wanted.contains(&name.to_lowercase()))
            .collect()
    }
}
