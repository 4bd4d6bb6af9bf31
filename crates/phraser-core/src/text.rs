// Lossless (prefix, word, suffix) splitting and sentence spans.
//
// The splitter is greedy: a word run is followed by the whole separator run
// up to the next word, so only the first triple of a text can carry a
// prefix. Concatenating the triples of a text that contains at least one
// word yields the text back byte for byte.

use std::fmt;

use crate::character::{has_word, is_separator_char, is_word_char};

// ---------------------------------------------------------------------------
// Triple
// ---------------------------------------------------------------------------

/// One word of a text together with the separators around it.
///
/// All three parts borrow from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple<'a> {
    /// Non-word characters before the word (only non-empty for the first
    /// triple of a text).
    pub prefix: &'a str,
    /// Maximal run of word characters.
    pub word: &'a str,
    /// Non-word characters after the word, up to the next word or the end.
    pub suffix: &'a str,
}

impl<'a> Triple<'a> {
    /// Create a triple from its three parts.
    pub fn new(prefix: &'a str, word: &'a str, suffix: &'a str) -> Self {
        Self {
            prefix,
            word,
            suffix,
        }
    }
}

impl fmt::Display for Triple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.word, self.suffix)
    }
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// Iterator over the triples of a text. Created by [`split_iter`].
#[derive(Debug, Clone)]
pub struct Triples<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Triples<'a> {
    type Item = Triple<'a>;

    fn next(&mut self) -> Option<Triple<'a>> {
        let rest = &self.text[self.pos..];
        let word_start = rest.find(is_word_char)?;

        let from_word = &rest[word_start..];
        let word_len = from_word.find(is_separator_char).unwrap_or(from_word.len());

        let from_suffix = &from_word[word_len..];
        let suffix_len = from_suffix.find(is_word_char).unwrap_or(from_suffix.len());

        self.pos += word_start + word_len + suffix_len;
        Some(Triple {
            prefix: &rest[..word_start],
            word: &from_word[..word_len],
            suffix: &from_suffix[..suffix_len],
        })
    }
}

/// Lazily split `text` into triples.
pub fn split_iter(text: &str) -> Triples<'_> {
    Triples { text, pos: 0 }
}

/// Split `text` into its ordered triples.
///
/// Returns an empty vector when `text` has no word character; callers are
/// expected to pass such text through untouched.
pub fn split_triples(text: &str) -> Vec<Triple<'_>> {
    split_iter(text).collect()
}

/// The word component of every triple, in order.
pub fn words<'a>(triples: &[Triple<'a>]) -> Vec<&'a str> {
    triples.iter().map(|t| t.word).collect()
}

/// Concatenate triples back into a string.
pub fn join_triples(triples: &[Triple<'_>]) -> String {
    let mut out = String::with_capacity(
        triples
            .iter()
            .map(|t| t.prefix.len() + t.word.len() + t.suffix.len())
            .sum(),
    );
    for triple in triples {
        out.push_str(triple.prefix);
        out.push_str(triple.word);
        out.push_str(triple.suffix);
    }
    out
}

// ---------------------------------------------------------------------------
// Sentences
// ---------------------------------------------------------------------------

/// Characters that end a sentence for training purposes.
fn is_sentence_boundary(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | ';' | '\n' | '\r')
}

/// Split `text` into sentence spans that contain at least one word.
///
/// The boundary characters themselves are dropped. Coarse: "e.g." ends two
/// sentences.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_sentence_boundary).filter(|s| has_word(s))
}
