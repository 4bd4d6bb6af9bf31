// Training parameters for collocation models.

use phraser_core::terms::CommonTerms;

use crate::scoring::Scoring;
use crate::{CollocError, CollocationTrainer, Phraser, Phrases, WordSequence};

/// Default collocation score threshold.
pub const DEFAULT_THRESHOLD: f64 = 350.0;

/// Default minimum number of joint occurrences for a pair to be scored.
pub const DEFAULT_MIN_COUNT: u64 = 200;

/// Vocabulary size above which rare entries are pruned during counting.
pub const DEFAULT_MAX_VOCAB_SIZE: usize = 40_000_000;

/// Parameters controlling collocation training.
#[derive(Debug, Clone, PartialEq)]
pub struct CollocationParams {
    /// Words that never start or end a phrase but may sit inside one.
    pub connector_words: CommonTerms,

    /// A candidate becomes a phrase when its score is strictly above this.
    pub threshold: f64,

    /// Minimum joint count, subtracted from (default scoring) or compared
    /// against (npmi) the phrase count.
    pub min_count: u64,

    /// Scoring function.
    pub scoring: Scoring,

    /// Prune the vocabulary once it holds more entries than this.
    pub max_vocab_size: usize,
}

impl Default for CollocationParams {
    fn default() -> Self {
        Self {
            connector_words: CommonTerms::new(),
            threshold: DEFAULT_THRESHOLD,
            min_count: DEFAULT_MIN_COUNT,
            scoring: Scoring::Default,
            max_vocab_size: DEFAULT_MAX_VOCAB_SIZE,
        }
    }
}

impl CollocationParams {
    pub fn with_connector_words(mut self, connector_words: CommonTerms) -> Self {
        self.connector_words = connector_words;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_max_vocab_size(mut self, max_vocab_size: usize) -> Self {
        self.max_vocab_size = max_vocab_size;
        self
    }

    /// Check the parameters. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), CollocError> {
        if self.min_count == 0 {
            return Err(CollocError::InvalidMinCount(self.min_count));
        }
        if !self.scoring.accepts_threshold(self.threshold) {
            return Err(CollocError::InvalidThreshold {
                scoring: self.scoring,
                threshold: self.threshold,
            });
        }
        if self.max_vocab_size == 0 {
            return Err(CollocError::InvalidMaxVocabSize);
        }
        Ok(())
    }
}

impl CollocationTrainer for CollocationParams {
    type Model = Phraser;

    /// Count the corpus, then freeze the result into a [`Phraser`].
    fn train(&self, corpus: &[WordSequence]) -> Result<Phraser, CollocError> {
        let phrases = Phrases::train(self.clone(), corpus)?;
        Ok(phrases.freeze())
    }
}
