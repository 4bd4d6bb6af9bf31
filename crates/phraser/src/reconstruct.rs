// Punctuation-preserving text reconstruction.
//
// A text is split into (prefix, word, suffix) triples, the bare words are
// handed to the collocation model, and the text is rebuilt by walking the
// triples and the phrase tokens side by side:
//
// - a token no longer than the current word stands for that word alone and
//   is emitted with the word's own prefix and suffix;
// - a longer token is a phrase: the words it absorbs are skipped until the
//   one matching its last `_` segment, which receives the token together
//   with its prefix and suffix.
//
// Separators and punctuation of absorbed words other than the last are
// therefore dropped ("customer-service" -> "customer_service").
//
// The checked walk resolves a phrase on the word that completes it rather
// than on the first word equal to its last segment, so phrases such as
// "day_to_day" are not cut short.

use phraser_colloc::Collocations;
use phraser_core::character::{char_len, has_word, last_segment, strip_non_word};
use phraser_core::{JOIN_CHAR, JOIN_STR};
use phraser_core::text::{Triple, split_triples, words};
use tracing::{trace, warn};

use crate::PhraseError;
use crate::config::DiscrepancyPolicy;

/// Rebuilt text plus the number of misaligned phrase tokens met on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub text: String,
    /// Always 0 under [`DiscrepancyPolicy::Legacy`], which does not check.
    pub discrepancies: usize,
}

/// Applies a collocation model to raw text, keeping its punctuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextReconstructor {
    policy: DiscrepancyPolicy,
}

impl TextReconstructor {
    pub fn new(policy: DiscrepancyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DiscrepancyPolicy {
        self.policy
    }

    /// Phrased version of `text`.
    pub fn apply<M>(&self, text: &str, model: &M) -> Result<String, PhraseError>
    where
        M: Collocations + ?Sized,
    {
        Ok(self.reconstruct(text, model)?.text)
    }

    /// Phrased version of `text` with its discrepancy count.
    ///
    /// Text without any word is returned unchanged and the model is not
    /// consulted.
    pub fn reconstruct<M>(&self, text: &str, model: &M) -> Result<Reconstruction, PhraseError>
    where
        M: Collocations + ?Sized,
    {
        if !has_word(text) {
            return Ok(Reconstruction {
                text: text.to_string(),
                discrepancies: 0,
            });
        }

        let triples = split_triples(text);
        let words = words(&triples);
        let phrased = model.phrase(&words);
        if phrased.len() > words.len() {
            return Err(PhraseError::ModelContract {
                words: words.len(),
                phrases: phrased.len(),
            });
        }

        let mut rebuild = Rebuild {
            policy: self.policy,
            triples: &triples,
            phrased: &phrased,
            out: String::with_capacity(text.len() + 8),
            discrepancies: 0,
        };
        match self.policy {
            DiscrepancyPolicy::Legacy => rebuild.unchecked()?,
            DiscrepancyPolicy::Fallback | DiscrepancyPolicy::Strict => rebuild.checked()?,
        }
        trace!(
            words = words.len(),
            tokens = phrased.len(),
            discrepancies = rebuild.discrepancies,
            "reconstructed text"
        );
        Ok(Reconstruction {
            text: rebuild.out,
            discrepancies: rebuild.discrepancies,
        })
    }
}

/// Phrase `text` with the default reconstructor.
pub fn phrase_text<M>(text: &str, model: &M) -> Result<String, PhraseError>
where
    M: Collocations + ?Sized,
{
    TextReconstructor::default().apply(text, model)
}

struct Rebuild<'t, 'a> {
    policy: DiscrepancyPolicy,
    triples: &'t [Triple<'a>],
    phrased: &'t [String],
    out: String,
    discrepancies: usize,
}

impl<'t> Rebuild<'t, '_> {
    /// Token `i`, or a contract error if the model ran out of tokens.
    fn token(&self, i: usize) -> Result<&'t str, PhraseError> {
        let phrased: &'t [String] = self.phrased;
        phrased
            .get(i)
            .map(String::as_str)
            .ok_or(PhraseError::ModelContract {
                words: self.triples.len(),
                phrases: phrased.len(),
            })
    }

    fn emit(&mut self, triple: &Triple<'_>, token: &str) {
        self.out.push_str(triple.prefix);
        self.out.push_str(token);
        self.out.push_str(triple.suffix);
    }

    fn emit_original(&mut self, triples: &[&Triple<'_>]) {
        for triple in triples {
            self.out.push_str(triple.prefix);
            self.out.push_str(triple.word);
            self.out.push_str(triple.suffix);
        }
    }

    /// Strict fails, Fallback logs and counts.
    fn discrepancy(&mut self, phrase: &str, word: &str) -> Result<(), PhraseError> {
        if self.policy == DiscrepancyPolicy::Strict {
            return Err(PhraseError::Discrepancy {
                phrase: phrase.to_string(),
                word: word.to_string(),
            });
        }
        warn!(phrase, word, "phrase token does not line up with the text, keeping original words");
        self.discrepancies += 1;
        Ok(())
    }

    /// Historical walk: no alignment check, unresolved tokens appended raw.
    fn unchecked(&mut self) -> Result<(), PhraseError> {
        let triples = self.triples;
        let mut i = 0;
        for triple in triples {
            let candidate = self.token(i)?;
            let phrased_word = strip_non_word(candidate);
            let clean_word = strip_non_word(triple.word);
            if char_len(&phrased_word) > char_len(&clean_word) {
                if last_segment(&phrased_word) == clean_word.as_ref() {
                    self.emit(triple, &phrased_word);
                    i += 1;
                }
            } else {
                self.emit(triple, &phrased_word);
                i += 1;
            }
        }
        let phrased = self.phrased;
        for rest in &phrased[i..] {
            self.out.push_str(rest);
        }
        Ok(())
    }

    /// Walk that checks every phrase token against the words it absorbs.
    fn checked(&mut self) -> Result<(), PhraseError> {
        let triples = self.triples;
        let mut pending: Vec<&Triple<'_>> = Vec::new();
        let mut i = 0;
        for triple in triples {
            let candidate = self.token(i)?;
            let phrased_word = strip_non_word(candidate);
            let clean_word = strip_non_word(triple.word);

            if char_len(&phrased_word) > char_len(&clean_word) {
                match cover(&phrased_word, &pending, &clean_word) {
                    Cover::Exact => self.emit(triple, &phrased_word),
                    Cover::Prefix => {
                        pending.push(triple);
                        continue;
                    }
                    // misaligned: resync on the last segment like the historical walk
                    Cover::Diverged if last_segment(&phrased_word) != clean_word.as_ref() => {
                        pending.push(triple);
                        continue;
                    }
                    Cover::Diverged => {
                        self.discrepancy(&phrased_word, triple.word)?;
                        pending.push(triple);
                        self.emit_original(&pending);
                    }
                }
            } else if pending.is_empty() {
                self.emit(triple, &phrased_word);
            } else {
                // a phrase token left unresolved, then consumed by a plain word
                self.discrepancy(&phrased_word, triple.word)?;
                pending.push(triple);
                self.emit_original(&pending);
            }
            pending.clear();
            i += 1;
        }

        if let Some(last) = pending.last() {
            let phrase = self.token(i)?.to_string();
            self.discrepancy(&phrase, last.word)?;
            self.emit_original(&pending);
            i += 1;
        }
        if i < self.phrased.len() {
            if self.policy == DiscrepancyPolicy::Strict {
                return Err(PhraseError::ModelContract {
                    words: triples.len(),
                    phrases: self.phrased.len(),
                });
            }
            warn!(
                leftover = self.phrased.len() - i,
                "dropping phrase tokens left over after the last word"
            );
            self.discrepancies += 1;
        }
        Ok(())
    }
}

/// How the pending words plus the current word line up with a phrase token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cover {
    /// They spell the whole phrase.
    Exact,
    /// They spell its leading `_`-segments; more words are needed.
    Prefix,
    Diverged,
}

fn cover(phrase: &str, pending: &[&Triple<'_>], word: &str) -> Cover {
    let mut joined = String::with_capacity(phrase.len());
    for triple in pending {
        joined.push_str(&strip_non_word(triple.word));
        joined.push_str(JOIN_STR);
    }
    joined.push_str(word);
    if joined == phrase {
        Cover::Exact
    } else if phrase
        .strip_prefix(joined.as_str())
        .is_some_and(|rest| rest.starts_with(JOIN_CHAR))
    {
        Cover::Prefix
    } else {
        Cover::Diverged
    }
}
