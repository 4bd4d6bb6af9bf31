// Trainable collocation model over a live vocabulary.

use hashbrown::HashMap;
use tracing::{debug, info};

use crate::params::CollocationParams;
use crate::scoring::ScoreInputs;
use crate::vocab::Vocab;
use crate::{CandidateScorer, CollocError, Collocations, Phraser, join_phrase};

/// A collocation model that keeps every count.
///
/// Useful while the corpus is still growing ([`Phrases::add_vocab`]) or to
/// inspect counts. For repeated application, [`Phrases::freeze`] it into a
/// [`Phraser`], which only keeps the phrasegrams above the threshold.
#[derive(Debug, Clone)]
pub struct Phrases {
    params: CollocationParams,
    vocab: Vocab,
}

impl Phrases {
    /// Create an empty model after validating `params`.
    pub fn new(params: CollocationParams) -> Result<Self, CollocError> {
        params.validate()?;
        Ok(Self {
            params,
            vocab: Vocab::new(),
        })
    }

    /// Create a model and count `corpus` into it.
    pub fn train<I, W, S>(params: CollocationParams, corpus: I) -> Result<Self, CollocError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut phrases = Self::new(params)?;
        phrases.add_vocab(corpus);
        Ok(phrases)
    }

    /// Count more sentences into the vocabulary.
    ///
    /// The vocabulary is pruned after any sentence that pushes it above the
    /// configured `max_vocab_size`.
    pub fn add_vocab<I, W, S>(&mut self, corpus: I)
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[S]>,
        S: AsRef<str>,
    {
        let words_before = self.vocab.corpus_word_count();
        let mut sentences = 0usize;
        for sentence in corpus {
            self.vocab
                .learn_sentence(sentence.as_ref(), &self.params.connector_words);
            self.vocab.prune_if_needed(self.params.max_vocab_size);
            sentences += 1;
        }
        info!(
            sentences,
            words = self.vocab.corpus_word_count() - words_before,
            vocab_size = self.vocab.len(),
            "collected word and phrase counts"
        );
    }

    pub fn params(&self) -> &CollocationParams {
        &self.params
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// Every phrasegram of the vocabulary that scores above the threshold,
    /// keyed by its joined token.
    pub fn export_phrases(&self) -> HashMap<String, f64> {
        let mut result = HashMap::new();
        for (parts, _) in self.vocab.phrases() {
            let [first, between @ .., last] = parts else {
                continue;
            };
            let between: Vec<&str> = between.iter().map(String::as_str).collect();
            if let Some(score) = self.score_candidate(first, last, &between) {
                result.insert(join_phrase(first, &between, last), score);
            }
        }
        debug!(phrases = result.len(), "exported phrasegrams");
        result
    }

    /// Freeze into a compact model for application and persistence.
    pub fn freeze(&self) -> Phraser {
        Phraser::from_phrases(self)
    }
}

impl CandidateScorer for Phrases {
    fn is_connector(&self, word: &str) -> bool {
        self.params.connector_words.contains(word)
    }

    fn score_candidate(&self, word_a: &str, word_b: &str, in_between: &[&str]) -> Option<f64> {
        let worda_count = self.vocab.word_count(word_a);
        if worda_count == 0 {
            return None;
        }
        let wordb_count = self.vocab.word_count(word_b);
        if wordb_count == 0 {
            return None;
        }

        let mut parts = Vec::with_capacity(in_between.len() + 2);
        parts.push(word_a);
        parts.extend_from_slice(in_between);
        parts.push(word_b);
        let bigram_count = self.vocab.phrase_count(&parts);
        if bigram_count == 0 {
            return None;
        }

        let score = self.params.scoring.score(&ScoreInputs {
            worda_count,
            wordb_count,
            bigram_count,
            len_vocab: self.vocab.len() as u64,
            min_count: self.params.min_count,
            corpus_word_count: self.vocab.corpus_word_count(),
        });
        (score > self.params.threshold).then_some(score)
    }
}

impl Collocations for Phrases {
    fn phrase(&self, words: &[&str]) -> Vec<String> {
        self.analyze_sentence(words)
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }
}
