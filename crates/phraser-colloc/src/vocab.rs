// Word and phrasegram counts.
//
// Phrasegrams are keyed by their component words rather than by the joined
// token, so a word that itself contains `_` cannot collide with a phrase.

use hashbrown::{Equivalent, HashMap};
use tracing::debug;

use phraser_core::terms::CommonTerms;

/// Borrowed lookup key for a phrasegram.
///
/// Hashes exactly like the owned `Vec<String>` key (length prefix followed
/// by each word), so lookups need no allocation.
#[derive(Hash)]
struct PhraseKey<'a>(&'a [&'a str]);

impl Equivalent<Vec<String>> for PhraseKey<'_> {
    fn equivalent(&self, key: &Vec<String>) -> bool {
        self.0.len() == key.len() && self.0.iter().zip(key).all(|(a, b)| *a == b)
    }
}

/// Counts collected while training a collocation model.
#[derive(Debug, Clone)]
pub struct Vocab {
    words: HashMap<String, u64>,
    phrases: HashMap<Vec<String>, u64>,
    corpus_word_count: u64,
    min_reduce: u64,
}

impl Default for Vocab {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocab {
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            phrases: HashMap::new(),
            corpus_word_count: 0,
            min_reduce: 1,
        }
    }

    /// Count one sentence.
    ///
    /// Every non-connector word is counted. Each pair of consecutive
    /// non-connector words is counted as a phrasegram together with the
    /// connectors between them; leading connectors are ignored. Every word,
    /// connectors included, counts toward the corpus size.
    pub fn learn_sentence<S: AsRef<str>>(&mut self, sentence: &[S], connectors: &CommonTerms) {
        let mut start: Option<&str> = None;
        let mut in_between: Vec<&str> = Vec::new();

        for word in sentence {
            let word = word.as_ref();
            if !connectors.contains(word) {
                *self.words.entry_ref(word).or_insert(0) += 1;
                if let Some(first) = start {
                    let mut parts = Vec::with_capacity(in_between.len() + 2);
                    parts.push(first);
                    parts.extend_from_slice(&in_between);
                    parts.push(word);
                    self.add_phrase(&parts);
                }
                start = Some(word);
                in_between.clear();
            } else if start.is_some() {
                in_between.push(word);
            }
            self.corpus_word_count += 1;
        }
    }

    fn add_phrase(&mut self, parts: &[&str]) {
        if let Some(count) = self.phrases.get_mut(&PhraseKey(parts)) {
            *count += 1;
        } else {
            let key = parts.iter().map(|w| w.to_string()).collect();
            self.phrases.insert(key, 1);
        }
    }

    /// Prune rare entries once the vocabulary exceeds `max_vocab_size`.
    ///
    /// Drops every word and phrasegram seen at most `min_reduce` times, then
    /// raises `min_reduce` so the next pruning is more aggressive. Returns
    /// the number of removed entries.
    pub fn prune_if_needed(&mut self, max_vocab_size: usize) -> usize {
        if self.len() <= max_vocab_size {
            return 0;
        }
        let before = self.len();
        let min_reduce = self.min_reduce;
        self.words.retain(|_, count| *count > min_reduce);
        self.phrases.retain(|_, count| *count > min_reduce);
        self.min_reduce += 1;

        let removed = before - self.len();
        debug!(removed, min_reduce, remaining = self.len(), "pruned vocabulary");
        removed
    }

    /// Number of distinct entries (words plus phrasegrams).
    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.phrases.is_empty()
    }

    /// Occurrences of a single word (0 if unknown or pruned).
    pub fn word_count(&self, word: &str) -> u64 {
        self.words.get(word).copied().unwrap_or(0)
    }

    /// Occurrences of a phrasegram given by its component words.
    pub fn phrase_count(&self, parts: &[&str]) -> u64 {
        self.phrases.get(&PhraseKey(parts)).copied().unwrap_or(0)
    }

    /// Total number of words counted, connectors included.
    pub fn corpus_word_count(&self) -> u64 {
        self.corpus_word_count
    }

    /// Current pruning floor.
    pub fn min_reduce(&self) -> u64 {
        self.min_reduce
    }

    /// Number of distinct words.
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    /// Iterate over phrasegrams and their counts.
    pub fn phrases(&self) -> impl Iterator<Item = (&[String], u64)> {
        self.phrases.iter().map(|(k, &v)| (k.as_slice(), v))
    }
}
