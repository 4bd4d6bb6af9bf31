// Phrase model options.

use std::fmt;
use std::str::FromStr;

use phraser_colloc::CollocationParams;
use phraser_colloc::params::{DEFAULT_MAX_VOCAB_SIZE, DEFAULT_MIN_COUNT, DEFAULT_THRESHOLD};
use phraser_colloc::scoring::Scoring;
use phraser_core::terms::CommonTerms;
use serde::{Deserialize, Serialize};

use crate::PhraseError;

/// Column holding the cleaned email body.
pub const BODY_COLUMN: &str = "clean_body";

/// Column holding the cleaned email header (subject).
pub const HEADER_COLUMN: &str = "clean_header";

/// What to do when a phrase token does not line up with the words it
/// should have absorbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscrepancyPolicy {
    /// Historical behavior: nothing is checked. Words absorbed by a phrase
    /// token that never resolves are lost, and unresolved tokens are
    /// appended raw at the end.
    Legacy,
    /// Keep the original words of the affected span, log a warning and
    /// count the event.
    #[default]
    Fallback,
    /// Fail with [`PhraseError::Discrepancy`].
    Strict,
}

impl fmt::Display for DiscrepancyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscrepancyPolicy::Legacy => f.write_str("legacy"),
            DiscrepancyPolicy::Fallback => f.write_str("fallback"),
            DiscrepancyPolicy::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for DiscrepancyPolicy {
    type Err = PhraseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(DiscrepancyPolicy::Legacy),
            "fallback" => Ok(DiscrepancyPolicy::Fallback),
            "strict" => Ok(DiscrepancyPolicy::Strict),
            _ => Err(PhraseError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Options of a [`PhraseModel`](crate::PhraseModel).
///
/// Missing fields take their default value when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConfig {
    /// Text column to train on.
    pub input_column: String,

    /// Connector terms: never start or end a phrase, may appear inside one.
    pub common_terms: CommonTerms,

    /// Minimum collocation score to join two tokens.
    pub threshold: f64,

    /// Minimum number of joint occurrences before a pair is scored.
    pub min_count: u64,

    /// Scoring function.
    pub scoring: Scoring,

    /// Vocabulary size that triggers pruning of rare entries.
    pub max_vocab_size: usize,

    /// Reconciliation behavior on misaligned phrase tokens.
    pub discrepancy: DiscrepancyPolicy,
}

impl Default for PhraseConfig {
    /// Train on `clean_body` with the built-in stopwords and names as
    /// connectors, threshold 350 and min_count 200.
    fn default() -> Self {
        Self {
            input_column: BODY_COLUMN.to_string(),
            common_terms: CommonTerms::defaults(),
            threshold: DEFAULT_THRESHOLD,
            min_count: DEFAULT_MIN_COUNT,
            scoring: Scoring::Default,
            max_vocab_size: DEFAULT_MAX_VOCAB_SIZE,
            discrepancy: DiscrepancyPolicy::default(),
        }
    }
}

impl PhraseConfig {
    pub fn with_input_column(mut self, column: impl Into<String>) -> Self {
        self.input_column = column.into();
        self
    }

    pub fn with_common_terms(mut self, common_terms: CommonTerms) -> Self {
        self.common_terms = common_terms;
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

    pub fn with_discrepancy(mut self, policy: DiscrepancyPolicy) -> Self {
        self.discrepancy = policy;
        self
    }

    /// Parameters handed to the collocation trainer.
    pub fn collocation_params(&self) -> CollocationParams {
        CollocationParams {
            connector_words: self.common_terms.clone(),
            threshold: self.threshold,
            min_count: self.min_count,
            scoring: self.scoring,
            max_vocab_size: self.max_vocab_size,
        }
    }

    /// Reject invalid options instead of clamping them.
    pub fn validate(&self) -> Result<(), PhraseError> {
        if self.input_column.trim().is_empty() {
            return Err(PhraseError::EmptyColumnName);
        }
        self.collocation_params().validate()?;
        Ok(())
    }
}
