//! Quote persistence — a flat CSV file of flattened `(text, author)` rows.
//!
//! Reads tolerate rows a human mangled by hand-editing the file (they are
//! skipped with a warning and left on disk); the add boundary is where
//! malformed shapes are rejected. Deletes rewrite the whole file through a
//! temporary sibling that only replaces the original after the full scan
//! succeeds, so a failed rewrite leaves prior state intact.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use tracing::{info, warn};

use super::error::{StoreError, StoreResult};
use super::rotation::RotationState;
use super::types::{is_field_prefix, QuoteRecord};
use super::ANY_AUTHOR;

/// Handle on the quotes CSV file. Cheap to construct; every operation opens
/// the file fresh, matching the single-process cooperative model.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw dump of every parseable record, in file order.
    ///
    /// A missing file reads as an empty store so a fresh install works before
    /// the first add. Rows that do not parse into `(text, author)` pairs are
    /// skipped with a warning, never silently returned.
    pub fn load_all(&self) -> StoreResult<Vec<QuoteRecord>> {
        let rows = self.load_rows()?;
        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match QuoteRecord::from_fields(row) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(row = index + 1, %err, "skipping malformed quote row");
                }
            }
        }
        Ok(records)
    }

    /// All records eligible under the author filter, deduplicated, in
    /// first-encountered order.
    ///
    /// The reserved name [`ANY_AUTHOR`] makes every record eligible;
    /// otherwise a record qualifies when any `" & "`-separated component of
    /// any author field equals `name` case-insensitively.
    pub fn list_by_author(&self, name: &str) -> StoreResult<Vec<QuoteRecord>> {
        let mut unique = HashSet::new();
        let mut eligible = Vec::new();
        for record in self.load_all()? {
            if name != ANY_AUTHOR && !record.mentions_author(name) {
                continue;
            }
            if unique.insert(record.clone()) {
                eligible.push(record);
            }
        }
        Ok(eligible)
    }

    /// The next unseen quote for `name`, under the rotation guarantee.
    ///
    /// Fails with [`StoreError::EmptyPool`] when the author has no quotes at
    /// all; a fully-seen pool resets instead of failing.
    pub fn get_next(
        &self,
        name: &str,
        seen: &mut RotationState<QuoteRecord>,
    ) -> StoreResult<QuoteRecord> {
        let eligible = self.list_by_author(name)?;
        seen.sample(&eligible)
    }

    /// Append one record built from a flattened field list. The file and its
    /// parent directory are created on first use.
    ///
    /// Authors are stored title-cased, text verbatim, every field quoted.
    /// Rejects odd field counts with [`StoreError::MalformedInput`] and
    /// collisions with [`StoreError::DuplicateRecord`] — two field lists that
    /// agree case-insensitively over their common prefix are the same quote.
    pub fn add(&self, fields: &[String]) -> StoreResult<QuoteRecord> {
        let record = QuoteRecord::from_fields(fields)?.title_cased();

        for existing in self.load_all()? {
            if existing.shares_prefix_with(&record) {
                return Err(StoreError::DuplicateRecord);
            }
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quote_style(QuoteStyle::Always)
            .from_writer(file);
        writer.write_record(record.to_fields())?;
        writer.flush()?;

        info!(fields = fields.len(), "added quote record");
        Ok(record)
    }

    /// Remove every record for which `partial` is a case-insensitive
    /// field-wise prefix. Returns how many records were dropped.
    ///
    /// The rewrite is atomic: retained rows (including any malformed ones,
    /// which are carried over untouched) go to a temporary sibling file that
    /// replaces the original only after the full scan succeeds. On failure
    /// the temporary file is removed and the original is untouched.
    pub fn remove(&self, partial: &[String]) -> StoreResult<usize> {
        if partial.is_empty() || partial.len() % 2 != 0 {
            return Err(StoreError::MalformedInput(
                "a delete needs a non-empty, even list of \"quote\" author fields".into(),
            ));
        }

        let rows = self.load_rows()?;
        let tmp_path = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let rewrite = (|| -> StoreResult<usize> {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .quote_style(QuoteStyle::Always)
                .from_path(&tmp_path)?;
            let mut removed = 0;
            for row in &rows {
                if is_field_prefix(partial, row) {
                    removed += 1;
                } else {
                    writer.write_record(row)?;
                }
            }
            writer.flush()?;
            Ok(removed)
        })();

        match rewrite {
            Ok(0) => {
                let _ = std::fs::remove_file(&tmp_path);
                Err(StoreError::NotFound)
            }
            Ok(removed) => {
                std::fs::rename(&tmp_path, &self.path)?;
                info!(removed, "removed quote records");
                Ok(removed)
            }
            Err(err) => {
                let _ = std::fs::remove_file(&tmp_path);
                Err(err)
            }
        }
    }

    /// Every row as its raw field list, in file order.
    fn load_rows(&self) -> StoreResult<Vec<Vec<String>>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        let mut rows = Vec::new();
        for row in reader.records() {
            let row = row?;
            rows.push(row.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}
