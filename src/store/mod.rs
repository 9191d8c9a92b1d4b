//! The content store core: quote and meme persistence, rotation sampling,
//! fuzzy lookup, and the contribution scoreboard.

pub mod error;
pub mod memes;
pub mod quotes;
pub mod rotation;
pub mod search;
pub mod stats;
pub mod types;

/// The reserved author name that widens a query to the whole store.
pub const ANY_AUTHOR: &str = "random";

/// Title-case a name: upper-case the first letter of every alphabetic run,
/// lower-case the rest. Non-alphabetic characters pass through and act as
/// word boundaries, so `"o'neil"` becomes `"O'Neil"`.
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_basic() {
        assert_eq!(title_case("alice"), "Alice");
        assert_eq!(title_case("BOB THE GREAT"), "Bob The Great");
        assert_eq!(title_case("alice & bob"), "Alice & Bob");
    }

    #[test]
    fn title_case_apostrophes_split_words() {
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn title_case_empty() {
        assert_eq!(title_case(""), "");
    }
}
