// Frozen collocation model.
//
// Keeps only the phrasegrams that scored above the threshold at freeze
// time, which makes it small, immutable and cheap to apply.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use phraser_core::terms::CommonTerms;

use crate::params::CollocationParams;
use crate::scoring::Scoring;
use crate::{CandidateScorer, Collocations, Phrases, join_phrase};

/// Immutable collocation model built from a trained [`Phrases`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phraser {
    phrasegrams: HashMap<String, f64>,
    connector_words: CommonTerms,
    threshold: f64,
    min_count: u64,
    scoring: Scoring,
}

impl Phraser {
    /// Freeze a trained model.
    pub fn from_phrases(phrases: &Phrases) -> Self {
        let params = phrases.params();
        let phrasegrams = phrases.export_phrases();
        info!(phrasegrams = phrasegrams.len(), "froze phrase model");
        Self {
            phrasegrams,
            connector_words: params.connector_words.clone(),
            threshold: params.threshold,
            min_count: params.min_count,
            scoring: params.scoring,
        }
    }

    /// A model that knows no phrase and passes every word through.
    pub fn empty(params: &CollocationParams) -> Self {
        Self {
            phrasegrams: HashMap::new(),
            connector_words: params.connector_words.clone(),
            threshold: params.threshold,
            min_count: params.min_count,
            scoring: params.scoring,
        }
    }

    /// Number of known phrasegrams.
    pub fn len(&self) -> usize {
        self.phrasegrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrasegrams.is_empty()
    }

    /// Score recorded for a joined phrase token, if it is known.
    pub fn score(&self, phrase: &str) -> Option<f64> {
        self.phrasegrams.get(phrase).copied()
    }

    /// All phrasegrams, best score first (ties by token).
    pub fn phrasegrams(&self) -> Vec<(&str, f64)> {
        let mut grams: Vec<(&str, f64)> = self
            .phrasegrams
            .iter()
            .map(|(k, &v)| (k.as_str(), v))
            .collect();
        grams.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        grams
    }

    pub fn connector_words(&self) -> &CommonTerms {
        &self.connector_words
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }
}

impl CandidateScorer for Phraser {
    fn is_connector(&self, word: &str) -> bool {
        self.connector_words.contains(word)
    }

    fn score_candidate(&self, word_a: &str, word_b: &str, in_between: &[&str]) -> Option<f64> {
        let phrase = join_phrase(word_a, in_between, word_b);
        self.phrasegrams
            .get(&phrase)
            .copied()
            .filter(|&score| score > self.threshold)
    }
}

impl Collocations for Phraser {
    fn phrase(&self, words: &[&str]) -> Vec<String> {
        self.analyze_sentence(words)
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> Phrases {
        let mut corpus = Vec::new();
        for _ in 0..10 {
            corpus.push(vec!["please", "call", "customer", "service", "today"]);
            corpus.push(vec!["customer", "service", "is", "closed"]);
            corpus.push(vec!["call", "me", "back"]);
        }
        let params = CollocationParams::default()
            .with_min_count(3)
            .with_threshold(0.5)
            .with_connector_words(CommonTerms::from_words(["is", "me"]));
        Phrases::train(params, corpus).unwrap()
    }

    #[test]
    fn frozen_matches_live_model() {
        let phrases = trained();
        let frozen = phrases.freeze();
        let sentences: [&[&str]; 3] = [
            &["please", "call", "customer", "service"],
            &["customer", "service", "is", "closed", "today"],
            &["nothing", "to", "see"],
        ];
        for words in sentences {
            assert_eq!(frozen.phrase(words), phrases.phrase(words));
        }
    }

    #[test]
    fn frozen_keeps_scores() {
        let phrases = trained();
        let frozen = phrases.freeze();
        assert_eq!(frozen.len(), phrases.export_phrases().len());
        let score = frozen.score("customer_service").unwrap();
        assert!(score > frozen.threshold());
        // below the threshold, so not kept
        assert_eq!(frozen.score("service_today"), None);
    }

    #[test]
    fn phrasegrams_sorted_by_score() {
        let frozen = trained().freeze();
        let grams = frozen.phrasegrams();
        assert!(!grams.is_empty());
        assert!(grams.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn empty_model_passes_through() {
        let frozen = Phraser::empty(&CollocationParams::default());
        assert!(frozen.is_empty());
        assert_eq!(frozen.phrase(&["new", "york"]), vec!["new", "york"]);
        assert_eq!(frozen.threshold(), 350.0);
        assert_eq!(frozen.min_count(), 200);
        assert_eq!(frozen.scoring(), Scoring::Default);
    }

    #[test]
    fn keeps_connector_words() {
        let frozen = trained().freeze();
        assert!(frozen.connector_words().contains("is"));
    }

    #[test]
    fn phraser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Phraser>();
    }
}
