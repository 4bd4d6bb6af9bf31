// Trainable, persistable phrase model.

use std::path::Path;

use phraser_colloc::{CollocationTrainer, Phraser, WordSequence};
use tracing::info;

use crate::config::PhraseConfig;
use crate::reconstruct::{Reconstruction, TextReconstructor};
use crate::record::Record;
use crate::streamer::Streamer;
use crate::{PhraseError, persist};

/// Phrase model over one text column.
///
/// Holds the configuration and, once trained or loaded, a frozen
/// [`Phraser`]. Training, saving and applying before a model exists fails
/// with [`PhraseError::ModelNotReady`] where relevant.
///
/// ```no_run
/// use phraser::{PhraseConfig, PhraseModel};
///
/// let mut model = PhraseModel::new(PhraseConfig::default())?;
/// let rows: Vec<serde_json::Value> = Vec::new();
/// model.train(&rows)?.save("phraser.bin")?;
/// println!("{}", model.apply("je vis a new york.")?);
/// # Ok::<(), phraser::PhraseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PhraseModel {
    config: PhraseConfig,
    streamer: Streamer,
    reconstructor: TextReconstructor,
    phraser: Option<Phraser>,
}

impl PhraseModel {
    /// Create an untrained model after validating `config`.
    pub fn new(config: PhraseConfig) -> Result<Self, PhraseError> {
        config.validate()?;
        Ok(Self {
            streamer: Streamer::new(config.input_column.clone()),
            reconstructor: TextReconstructor::new(config.discrepancy),
            config,
            phraser: None,
        })
    }

    /// Create a model and load its collocations from `path`.
    pub fn from_file(config: PhraseConfig, path: impl AsRef<Path>) -> Result<Self, PhraseError> {
        let mut model = Self::new(config)?;
        model.load(path)?;
        Ok(model)
    }

    pub fn config(&self) -> &PhraseConfig {
        &self.config
    }

    /// True once the model was trained or loaded.
    pub fn is_ready(&self) -> bool {
        self.phraser.is_some()
    }

    /// The trained collocation model.
    pub fn phraser(&self) -> Result<&Phraser, PhraseError> {
        self.phraser.as_ref().ok_or(PhraseError::ModelNotReady)
    }

    /// Replace the collocation model, e.g. with one trained elsewhere.
    pub fn set_phraser(&mut self, phraser: Phraser) -> &mut Self {
        self.phraser = Some(phraser);
        self
    }

    /// Train on the configured column of `corpus`.
    ///
    /// Replaces any previous model. An empty corpus gives a model that
    /// knows no phrase.
    pub fn train<R: Record>(&mut self, corpus: &[R]) -> Result<&mut Self, PhraseError> {
        info!(
            column = self.streamer.column(),
            rows = corpus.len(),
            "start training phrase model"
        );
        let sentences = self.streamer.to_stream(corpus)?;
        self.fit(&sentences)?;
        Ok(self)
    }

    /// Train on already tokenized sentences.
    pub fn train_sentences(&mut self, sentences: &[WordSequence]) -> Result<&mut Self, PhraseError> {
        info!(sentences = sentences.len(), "start training phrase model");
        self.fit(sentences)?;
        Ok(self)
    }

    fn fit(&mut self, sentences: &[WordSequence]) -> Result<(), PhraseError> {
        let phraser = self.config.collocation_params().train(sentences)?;
        info!(phrasegrams = phraser.len(), "finished training phrase model");
        self.phraser = Some(phraser);
        Ok(())
    }

    /// Write the trained model to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PhraseError> {
        persist::save_phraser(self.phraser()?, path.as_ref())
    }

    /// Replace the collocation model with the one stored at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, PhraseError> {
        self.phraser = Some(persist::load_phraser(path.as_ref())?);
        Ok(self)
    }

    /// Phrased version of `text`, punctuation preserved.
    pub fn apply(&self, text: &str) -> Result<String, PhraseError> {
        self.reconstructor.apply(text, self.phraser()?)
    }

    /// Like [`apply`](Self::apply), with the discrepancy count.
    pub fn reconstruct(&self, text: &str) -> Result<Reconstruction, PhraseError> {
        self.reconstructor.reconstruct(text, self.phraser()?)
    }
}
