// Rows of text to word sequences for collocation training.

use phraser_colloc::WordSequence;
use phraser_core::terms::CommonTerms;
use phraser_core::text::{sentences, split_iter};

use crate::PhraseError;
use crate::record::Record;

/// Turns one text column into a corpus of word sequences.
///
/// Each text is cut into sentences (see [`sentences`]) and each sentence
/// into its word runs, so punctuation never ends up inside a training
/// token and counts never cross a sentence break.
#[derive(Debug, Clone)]
pub struct Streamer {
    column: String,
    stopwords: Option<CommonTerms>,
}

impl Streamer {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            stopwords: None,
        }
    }

    /// Drop `stopwords` from every sentence.
    pub fn with_stop_removal(mut self, stopwords: CommonTerms) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Word sequences of one text, one per non-empty sentence.
    pub fn tokenize(&self, text: &str) -> Vec<WordSequence> {
        sentences(text)
            .map(|sentence| {
                split_iter(sentence)
                    .map(|triple| triple.word)
                    .filter(|word| !self.is_stopword(word))
                    .map(str::to_string)
                    .collect::<WordSequence>()
            })
            .filter(|words| !words.is_empty())
            .collect()
    }

    /// Word sequences of every row, in row order.
    ///
    /// Fails on the first row whose column is missing or not text.
    pub fn to_stream<R: Record>(&self, records: &[R]) -> Result<Vec<WordSequence>, PhraseError> {
        let mut stream = Vec::new();
        for record in records {
            let text = record
                .field(&self.column)
                .ok_or_else(|| PhraseError::MissingColumn(self.column.clone()))?;
            stream.extend(self.tokenize(text));
        }
        Ok(stream)
    }

    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords
            .as_ref()
            .is_some_and(|stopwords| stopwords.contains(word))
    }
}
