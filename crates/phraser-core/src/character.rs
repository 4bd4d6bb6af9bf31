// Character classification and token cleanup.
//
// A "word character" is anything `char::is_alphanumeric` accepts plus the
// underscore, so joined phrase tokens ("new_york") stay single words.

use std::borrow::Cow;

use crate::JOIN_CHAR;

/// Check whether a character belongs to a word run.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Check whether a character separates words (whitespace, punctuation,
/// apostrophes, quotes, symbols).
pub fn is_separator_char(c: char) -> bool {
    !is_word_char(c)
}

/// Returns `true` if `text` contains at least one word character.
pub fn has_word(text: &str) -> bool {
    text.chars().any(is_word_char)
}

/// Remove every non-word character from `token`.
///
/// Borrows the input when there is nothing to remove, which is the common
/// case for tokens coming out of the splitter or the collocation model.
pub fn strip_non_word(token: &str) -> Cow<'_, str> {
    if token.chars().all(is_word_char) {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(token.chars().filter(|&c| is_word_char(c)).collect())
    }
}

/// Returns the part of a phrase token after its last [`JOIN_CHAR`].
///
/// A token without a join character is its own last segment.
pub fn last_segment(token: &str) -> &str {
    match token.rfind(JOIN_CHAR) {
        Some(idx) => &token[idx + JOIN_CHAR.len_utf8()..],
        None => token,
    }
}

/// Number of characters (not bytes) in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- is_word_char tests --

    #[test]
    fn letters_digits_underscore_are_word_chars() {
        for c in ['a', 'Z', '0', '9', '_', '\u{00E9}', '\u{00E4}'] {
            assert!(is_word_char(c), "{c:?} should be a word char");
        }
    }

    #[test]
    fn punctuation_and_space_are_separators() {
        for c in [' ', '\t', '\n', '.', ',', '\'', '-', '"', '!', '\u{2019}', '@'] {
            assert!(is_separator_char(c), "{c:?} should be a separator");
        }
    }

    // -- has_word tests --

    #[test]
    fn has_word_detects_any_word() {
        assert!(has_word("hello"));
        assert!(has_word("  !! a ,,"));
        assert!(has_word("42"));
    }

    #[test]
    fn has_word_rejects_pure_punctuation() {
        assert!(!has_word(""));
        assert!(!has_word("   !!! ,,,"));
        assert!(!has_word("\n\t-- ' \""));
    }

    // -- strip_non_word tests --

    #[test]
    fn strip_borrows_clean_tokens() {
        assert!(matches!(strip_non_word("new_york"), Cow::Borrowed("new_york")));
    }

    #[test]
    fn strip_removes_punctuation() {
        assert_eq!(strip_non_word("don't"), "dont");
        assert_eq!(strip_non_word("-new_york!"), "new_york");
        assert_eq!(strip_non_word("..."), "");
    }

    // -- last_segment tests --

    #[test]
    fn last_segment_of_phrase() {
        assert_eq!(last_segment("new_york_city"), "city");
        assert_eq!(last_segment("state_of_the_art"), "art");
    }

    #[test]
    fn last_segment_of_single_word() {
        assert_eq!(last_segment("york"), "york");
    }

    #[test]
    fn last_segment_of_trailing_join() {
        assert_eq!(last_segment("york_"), "");
    }

    #[test]
    fn char_len_counts_characters() {
        assert_eq!(char_len("\u{00E4}iti"), 4);
        assert_eq!("\u{00E4}iti".len(), 5);
    }
}
