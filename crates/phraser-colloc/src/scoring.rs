// Pair scoring functions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CollocError;

/// Counts needed to score one candidate phrase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    /// Occurrences of the first word.
    pub worda_count: u64,
    /// Occurrences of the last word.
    pub wordb_count: u64,
    /// Occurrences of the whole candidate phrase.
    pub bigram_count: u64,
    /// Number of distinct entries (words and phrasegrams) in the vocabulary.
    pub len_vocab: u64,
    /// Configured minimum count.
    pub min_count: u64,
    /// Total number of words seen during training.
    pub corpus_word_count: u64,
}

/// Scoring function used to rank candidate phrases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scoring {
    /// `(bigram - min_count) / (a * b) * len_vocab`; unbounded above,
    /// thresholds must be positive.
    #[default]
    Default,
    /// Normalized pointwise mutual information, in `[-1, 1]`.
    Npmi,
}

impl Scoring {
    pub fn score(self, inputs: &ScoreInputs) -> f64 {
        match self {
            Scoring::Default => original_scorer(inputs),
            Scoring::Npmi => npmi_scorer(inputs),
        }
    }

    /// Returns `true` if `threshold` is meaningful for this scoring function.
    pub fn accepts_threshold(self, threshold: f64) -> bool {
        match self {
            Scoring::Default => threshold > 0.0,
            Scoring::Npmi => (-1.0..=1.0).contains(&threshold),
        }
    }
}

impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scoring::Default => f.write_str("default"),
            Scoring::Npmi => f.write_str("npmi"),
        }
    }
}

impl FromStr for Scoring {
    type Err = CollocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Scoring::Default),
            "npmi" => Ok(Scoring::Npmi),
            _ => Err(CollocError::UnknownScoring(s.to_string())),
        }
    }
}

/// Frequency-based score: how much more often the pair occurs than chance
/// would suggest, discounted by `min_count`.
///
/// Returns negative infinity when either word was never seen.
pub fn original_scorer(inputs: &ScoreInputs) -> f64 {
    let denom = inputs.worda_count as f64 * inputs.wordb_count as f64;
    if denom == 0.0 {
        return f64::NEG_INFINITY;
    }
    (inputs.bigram_count as f64 - inputs.min_count as f64) / denom * inputs.len_vocab as f64
}

/// Normalized pointwise mutual information.
///
/// Pairs seen fewer than `min_count` times score negative infinity. A pair
/// making up the whole corpus (`p(ab) == 1`) scores 1.
pub fn npmi_scorer(inputs: &ScoreInputs) -> f64 {
    if inputs.bigram_count < inputs.min_count || inputs.corpus_word_count == 0 {
        return f64::NEG_INFINITY;
    }
    let total = inputs.corpus_word_count as f64;
    let pa = inputs.worda_count as f64 / total;
    let pb = inputs.wordb_count as f64 / total;
    let pab = inputs.bigram_count as f64 / total;

    let norm = -pab.ln();
    if norm == 0.0 {
        return 1.0;
    }
    (pab / (pa * pb)).ln() / norm
}
