//! Collocation phrase substitution for short, noisy text.
//!
//! [`PhraseModel`] trains a collocation model over a column of cleaned
//! email text and persists it; [`TextReconstructor`] applies a model to one
//! text and rebuilds it with the original punctuation and separators, so
//! that "I live in new york city." becomes "I live in new_york city.".
//!
//! - [`config`] -- training and reconciliation options
//! - [`streamer`] -- rows of text to word sequences
//! - [`record`] -- text field access on tabular rows
//! - [`reconstruct`] -- punctuation-preserving reconstruction
//! - [`model`] -- the trainable, persistable wrapper
//! - [`persist`] -- binary model files
//! - [`adapters`] -- per-row helpers for `clean_body` / `clean_header`

pub mod adapters;
pub mod config;
pub mod model;
pub mod persist;
pub mod reconstruct;
pub mod record;
pub mod streamer;

pub use adapters::{phrase_column, phrase_on_body, phrase_on_field, phrase_on_header};
pub use config::{DiscrepancyPolicy, PhraseConfig};
pub use model::PhraseModel;
pub use reconstruct::{Reconstruction, TextReconstructor, phrase_text};
pub use record::Record;
pub use streamer::Streamer;

pub use phraser_colloc::{Collocations, Phraser, Scoring};
pub use phraser_core::terms::CommonTerms;

use phraser_colloc::CollocError;
use phraser_core::terms::TermsError;

/// Error type for phrase model training, persistence and application.
#[derive(Debug, thiserror::Error)]
pub enum PhraseError {
    /// Invalid collocation parameters.
    #[error("invalid phrase model configuration: {0}")]
    Config(#[from] CollocError),

    /// The input column name is empty.
    #[error("input column name must not be empty")]
    EmptyColumnName,

    /// Unknown discrepancy policy name.
    #[error("unknown discrepancy policy: {0}")]
    UnknownPolicy(String),

    /// The model was used before being trained or loaded.
    #[error("phrase model has not been trained or loaded")]
    ModelNotReady,

    /// Reading or writing a model file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file does not start with the phrase model magic number.
    #[error("not a phrase model file (invalid magic number)")]
    InvalidMagic,

    /// The file was written by an incompatible format version.
    #[error("unsupported phrase model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The model payload could not be decoded.
    #[error("failed to decode phrase model: {0}")]
    Decode(#[source] bincode::Error),

    /// The model could not be encoded.
    #[error("failed to encode phrase model: {0}")]
    Encode(#[source] bincode::Error),

    /// A row has no text under the requested field.
    #[error("record has no text field {0:?}")]
    MissingColumn(String),

    /// The collocation model broke its output contract.
    #[error("collocation model returned {phrases} tokens for {words} words")]
    ModelContract { words: usize, phrases: usize },

    /// A phrase token does not line up with the source words (strict policy).
    #[error("phrase token {phrase:?} does not line up with word {word:?}")]
    Discrepancy { phrase: String, word: String },

    /// A word-list file could not be loaded.
    #[error(transparent)]
    Terms(#[from] TermsError),
}
