//! Collocation detection engine.
//!
//! Counts words and word pairs over a corpus of tokenized sentences, scores
//! each pair and joins the pairs scoring above a threshold into phrase
//! tokens ("new" + "york" -> "new_york"). Connector words (stopwords, names)
//! never start or end a phrase but may appear inside one.
//!
//! # Architecture
//!
//! - [`scoring`] -- pair scoring functions (default and normalized PMI)
//! - [`params`] -- training parameters and their validation
//! - [`vocab`] -- word and phrasegram counts with vocabulary pruning
//! - [`phrases`] -- trainable model over a live vocabulary
//! - [`frozen`] -- compact, serializable model holding only the phrasegrams
//!
//! Consumers depend on the [`Collocations`] / [`CollocationTrainer`] pair
//! only, so any equivalent scorer can stand in for the native one.

pub mod frozen;
pub mod params;
pub mod phrases;
pub mod scoring;
pub mod vocab;

pub use frozen::Phraser;
pub use params::CollocationParams;
pub use phrases::Phrases;
pub use scoring::Scoring;

use phraser_core::JOIN_STR;

/// Error type for collocation model configuration.
#[derive(Debug, thiserror::Error)]
pub enum CollocError {
    #[error("min_count should be at least 1, got {0}")]
    InvalidMinCount(u64),
    #[error("threshold {threshold} is not valid for {scoring} scoring")]
    InvalidThreshold { scoring: Scoring, threshold: f64 },
    #[error("max_vocab_size should be at least 1")]
    InvalidMaxVocabSize,
    #[error("unknown scoring function: {0}")]
    UnknownScoring(String),
}

/// Ordered words of one sentence or text.
pub type WordSequence = Vec<String>;

/// Applies a trained collocation model to a word sequence.
///
/// The output never has more elements than the input, and joining it with
/// `_` gives the input joined with `_`: words are merged, never dropped,
/// reordered or invented.
pub trait Collocations {
    fn phrase(&self, words: &[&str]) -> Vec<String>;
}

/// Trains a collocation model from a corpus of sentences.
pub trait CollocationTrainer {
    type Model: Collocations;

    fn train(&self, corpus: &[WordSequence]) -> Result<Self::Model, CollocError>;
}

/// Pair scoring shared by the live and the frozen model.
///
/// Implementors only answer "is this a connector" and "what does this
/// candidate score"; the sentence walk is common.
pub trait CandidateScorer {
    /// Returns `true` if `word` is a connector term.
    fn is_connector(&self, word: &str) -> bool;

    /// Score of the phrase `word_a + in_between + word_b`, or `None` if it is
    /// unknown or does not exceed the threshold.
    fn score_candidate(&self, word_a: &str, word_b: &str, in_between: &[&str]) -> Option<f64>;

    /// Walk a sentence and return every output token with the score of the
    /// phrase it forms (`None` for tokens passed through unchanged).
    ///
    /// A non-connector word either closes a phrase with the pending start
    /// word or becomes the new start word; connectors are buffered after a
    /// start word and flushed with it when no phrase is formed.
    fn analyze_sentence(&self, words: &[&str]) -> Vec<(String, Option<f64>)> {
        let mut out = Vec::with_capacity(words.len());
        let mut start: Option<&str> = None;
        let mut in_between: Vec<&str> = Vec::new();

        for &word in words {
            if !self.is_connector(word) {
                match start {
                    Some(first) => {
                        if let Some(score) = self.score_candidate(first, word, &in_between) {
                            out.push((join_phrase(first, &in_between, word), Some(score)));
                            start = None;
                        } else {
                            out.push((first.to_string(), None));
                            out.extend(in_between.iter().map(|w| (w.to_string(), None)));
                            start = Some(word);
                        }
                        in_between.clear();
                    }
                    None => {
                        start = Some(word);
                        in_between.clear();
                    }
                }
            } else if start.is_some() {
                in_between.push(word);
            } else {
                out.push((word.to_string(), None));
            }
        }

        if let Some(first) = start {
            out.push((first.to_string(), None));
            out.extend(in_between.iter().map(|w| (w.to_string(), None)));
        }
        out
    }
}

/// Join `word_a`, the connectors and `word_b` into one phrase token.
pub fn join_phrase(word_a: &str, in_between: &[&str], word_b: &str) -> String {
    let len = word_a.len()
        + word_b.len()
        + in_between.iter().map(|w| w.len()).sum::<usize>()
        + (in_between.len() + 1) * JOIN_STR.len();
    let mut phrase = String::with_capacity(len);
    phrase.push_str(word_a);
    for w in in_between {
        phrase.push_str(JOIN_STR);
        phrase.push_str(w);
    }
    phrase.push_str(JOIN_STR);
    phrase.push_str(word_b);
    phrase
}
