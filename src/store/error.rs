//! Typed failures for store operations.
//!
//! Every store operation returns [`StoreResult`]; the command layer matches on
//! [`StoreError`] variants to turn them into user-visible text. Nothing here
//! is fatal to the process.

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A field list that cannot form `(text, author)` pairs, or a missing
    /// required argument.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An add collided with an existing quote record.
    #[error("quote already exists in the store")]
    DuplicateRecord,

    /// A meme save collided with an existing filename stem for that author.
    #[error("filename '{0}' is already taken for this author")]
    DuplicateName(String),

    /// A delete target was absent.
    #[error("no matching entry found")]
    NotFound,

    /// A queried author has no directory or records.
    #[error("author '{0}' has no entries")]
    AuthorNotFound(String),

    /// The sampler was invoked against zero eligible items.
    #[error("no eligible items to sample from")]
    EmptyPool,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
