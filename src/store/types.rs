//! Validated quote record types.
//!
//! A [`QuoteRecord`] can only be built through [`QuoteRecord::from_fields`],
//! which rejects malformed shapes at the boundary — downstream code never sees
//! a loose field list it has to re-validate.

use serde::{Deserialize, Serialize};

use super::error::{StoreError, StoreResult};
use super::title_case;

/// One quotation and the author it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteLine {
    /// The quoted text, stored verbatim.
    pub text: String,
    /// The author field. Joint quotes hold several names joined by `" & "`.
    pub author: String,
}

/// An ordered sequence of quote lines stored as one row.
///
/// A single record may encode a multi-part exchange with several authors.
/// Identity is the exact tuple of all fields in order — that is what the
/// seen-set and duplicate detection key on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub lines: Vec<QuoteLine>,
}

impl QuoteRecord {
    /// Parse a flattened `text, author, text, author, ...` field list.
    ///
    /// Rejects empty and odd-length lists with [`StoreError::MalformedInput`].
    pub fn from_fields(fields: &[String]) -> StoreResult<Self> {
        if fields.is_empty() {
            return Err(StoreError::MalformedInput(
                "no quote fields were given".into(),
            ));
        }
        if fields.len() % 2 != 0 {
            return Err(StoreError::MalformedInput(format!(
                "expected alternating \"quote\" author pairs, got {} fields",
                fields.len()
            )));
        }

        let lines = fields
            .chunks_exact(2)
            .map(|pair| QuoteLine {
                text: pair[0].clone(),
                author: pair[1].clone(),
            })
            .collect();
        Ok(Self { lines })
    }

    /// Flatten back into the on-disk field order.
    pub fn to_fields(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|line| [line.text.clone(), line.author.clone()])
            .collect()
    }

    /// Copy of this record with every author field title-cased, as stored on
    /// disk. Text fields are untouched.
    pub fn title_cased(&self) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .map(|line| QuoteLine {
                    text: line.text.clone(),
                    author: title_case(&line.author),
                })
                .collect(),
        }
    }

    /// Whether any author field mentions `name`, case-insensitively.
    ///
    /// Joint author fields are split on `" & "` and each component compared
    /// on its own, so `"Alice & Bob"` is mentioned by both `alice` and `bob`.
    pub fn mentions_author(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.lines.iter().any(|line| {
            line.author
                .split(" & ")
                .any(|component| component.to_lowercase() == wanted)
        })
    }

    /// Whether this record's fields and `other`'s fields agree over their
    /// common prefix, case-insensitively. This is the duplicate test for
    /// adds: a new record that extends (or truncates) an existing row still
    /// counts as the same quote.
    pub fn shares_prefix_with(&self, other: &QuoteRecord) -> bool {
        self.to_fields()
            .iter()
            .zip(other.to_fields().iter())
            .all(|(a, b)| a.to_lowercase() == b.to_lowercase())
    }
}

/// Whether `partial` is a case-insensitive field-wise prefix of `row`.
///
/// Used by the delete path, where the caller only has to supply enough fields
/// to identify the record.
pub(crate) fn is_field_prefix(partial: &[String], row: &[String]) -> bool {
    partial.len() <= row.len()
        && partial
            .iter()
            .zip(row.iter())
            .all(|(p, f)| p.to_lowercase() == f.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_single_pair() {
        let record = QuoteRecord::from_fields(&fields(&["hello there", "Alice"])).unwrap();
        assert_eq!(record.lines.len(), 1);
        assert_eq!(record.lines[0].text, "hello there");
        assert_eq!(record.lines[0].author, "Alice");
    }

    #[test]
    fn parse_multi_pair_exchange() {
        let record =
            QuoteRecord::from_fields(&fields(&["hi", "Alice", "hi yourself", "Bob"])).unwrap();
        assert_eq!(record.lines.len(), 2);
        assert_eq!(record.lines[1].author, "Bob");
    }

    #[test]
    fn odd_field_count_is_malformed() {
        let err = QuoteRecord::from_fields(&fields(&["hello", "Alice", "world"])).unwrap_err();
        assert!(matches!(err, StoreError::MalformedInput(_)));
    }

    #[test]
    fn empty_fields_are_malformed() {
        let err = QuoteRecord::from_fields(&[]).unwrap_err();
        assert!(matches!(err, StoreError::MalformedInput(_)));
    }

    #[test]
    fn roundtrip_to_fields() {
        let raw = fields(&["a", "Alice", "b", "Bob"]);
        let record = QuoteRecord::from_fields(&raw).unwrap();
        assert_eq!(record.to_fields(), raw);
    }

    #[test]
    fn title_cased_leaves_text_verbatim() {
        let record =
            QuoteRecord::from_fields(&fields(&["i SAID what i SAID", "alice & bob"])).unwrap();
        let stored = record.title_cased();
        assert_eq!(stored.lines[0].text, "i SAID what i SAID");
        assert_eq!(stored.lines[0].author, "Alice & Bob");
    }

    #[test]
    fn mentions_author_is_case_insensitive() {
        let record = QuoteRecord::from_fields(&fields(&["q", "Alice"])).unwrap();
        assert!(record.mentions_author("ALICE"));
        assert!(!record.mentions_author("Ali"));
    }

    #[test]
    fn mentions_author_splits_joint_fields() {
        let record = QuoteRecord::from_fields(&fields(&["q", "Alice & Bob"])).unwrap();
        assert!(record.mentions_author("bob"));
        assert!(record.mentions_author("alice"));
        assert!(!record.mentions_author("alice & b"));
    }

    #[test]
    fn shares_prefix_with_shorter_existing_row() {
        let existing = QuoteRecord::from_fields(&fields(&["hi", "Alice"])).unwrap();
        let longer =
            QuoteRecord::from_fields(&fields(&["HI", "alice", "more", "Bob"])).unwrap();
        assert!(longer.shares_prefix_with(&existing));
        assert!(existing.shares_prefix_with(&longer));
    }

    #[test]
    fn distinct_records_do_not_share_prefix() {
        let a = QuoteRecord::from_fields(&fields(&["hi", "Alice"])).unwrap();
        let b = QuoteRecord::from_fields(&fields(&["bye", "Alice"])).unwrap();
        assert!(!a.shares_prefix_with(&b));
    }

    #[test]
    fn field_prefix_requires_partial_no_longer_than_row() {
        let row = fields(&["hi", "Alice"]);
        assert!(is_field_prefix(&fields(&["HI"]), &row));
        assert!(is_field_prefix(&fields(&["hi", "alice"]), &row));
        assert!(!is_field_prefix(&fields(&["hi", "alice", "x", "y"]), &row));
        assert!(!is_field_prefix(&fields(&["bye"]), &row));
    }
}
