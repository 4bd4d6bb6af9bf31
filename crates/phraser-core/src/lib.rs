//! Shared text types for phraser.
//!
//! - [`character`] -- word/non-word character classes and token cleanup
//! - [`text`] -- lossless (prefix, word, suffix) splitting and sentence spans
//! - [`terms`] -- connector word lists (stopwords and names)

pub mod character;
pub mod terms;
pub mod text;

/// Character used to join the words of a phrase token ("new" + "york" -> "new_york").
pub const JOIN_CHAR: char = '_';

/// [`JOIN_CHAR`] as a string, for `join`/`split` calls.
pub const JOIN_STR: &str = "_";
