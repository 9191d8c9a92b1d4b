//! Content store and no-repeat sampler for a personal quote/meme chat bot.
//!
//! Bruh Bot replays two kinds of user-submitted content: short text quotes
//! attributed to one or more authors, and image memes attributed to a single
//! author. The interesting part is not the transport glue but the store
//! underneath it:
//!
//! - **Quotes** live as rows in a flat CSV file, each row a flattened
//!   sequence of `(text, author)` pairs. Adds detect near/exact duplicates;
//!   deletes rewrite the file atomically through a temporary sibling.
//! - **Memes** live as files in one directory per author. Filename stems are
//!   unique per author; extensions are inferred from the source attachment.
//! - **Rotation sampling** guarantees that no quote or meme repeats until
//!   the whole eligible pool has been shown once, then the cycle restarts.
//!   Draws come from the operating system's entropy source so the next pick
//!   is never predictable.
//! - **The scoreboard** aggregates both stores into per-author contribution
//!   counts for the leaderboard rendering layer.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`store`] — Quote store, meme store, rotation sampler, fuzzy lookup, and
//!   the contribution scoreboard

pub mod config;
pub mod store;
