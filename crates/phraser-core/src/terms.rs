// Connector word lists: stopwords and names.
//
// Connector terms never start or end a collocation but may sit inside one
// ("state_of_the_art"). The built-in lists target cleaned French/English
// email text; callers override them by passing their own `CommonTerms`.

use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Error type for word-list loading.
#[derive(Debug, thiserror::Error)]
pub enum TermsError {
    /// The word-list file could not be read.
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Built-in stopwords (French and English function words).
const BUILTIN_STOPWORDS: &[&str] = &[
    // French
    "a", "afin", "ai", "au", "aux", "avec", "avez", "avons", "ce", "ces", "cet", "cette", "dans",
    "de", "des", "du", "elle", "en", "est", "et", "etre", "eu", "il", "ils", "je", "la", "le",
    "les", "leur", "lui", "ma", "mais", "me", "mes", "moi", "mon", "ne", "nos", "notre", "nous",
    "on", "ont", "ou", "par", "pas", "pour", "qu", "que", "qui", "sa", "se", "ses", "son", "sont",
    "sur", "ta", "te", "tes", "toi", "ton", "tu", "un", "une", "vos", "votre", "vous", "y",
    // English
    "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in", "is", "it",
    "its", "of", "or", "that", "the", "this", "to", "was", "were", "will", "with",
];

/// Built-in first names commonly found in email greetings and signatures.
const BUILTIN_NAMES: &[&str] = &[
    "alain", "alice", "anne", "antoine", "bernard", "camille", "catherine", "christine", "claire",
    "daniel", "david", "emma", "eric", "francois", "frederic", "helene", "isabelle", "jacques",
    "jean", "julie", "laurent", "louis", "marc", "marie", "martin", "michel", "nathalie",
    "nicolas", "olivier", "patrick", "paul", "philippe", "pierre", "sophie", "stephane",
    "sylvie", "thomas", "valerie",
];

/// A set of connector terms.
///
/// Terms are stored trimmed and lowercased whatever their source, and
/// serialize as a sorted list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CommonTerms {
    terms: HashSet<String>,
}

impl CommonTerms {
    /// Create an empty set (every word may start or end a phrase).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from arbitrary words. Blank words are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms = Self::new();
        terms.extend(words);
        terms
    }

    /// The built-in stopword list.
    pub fn builtin_stopwords() -> Self {
        Self::from_words(BUILTIN_STOPWORDS.iter().copied())
    }

    /// The built-in names list.
    pub fn builtin_names() -> Self {
        Self::from_words(BUILTIN_NAMES.iter().copied())
    }

    /// Union of the built-in stopwords and names.
    pub fn defaults() -> Self {
        Self::builtin_stopwords().union(&Self::builtin_names())
    }

    /// Load stopwords and names from two word-list files and merge them.
    pub fn from_files(stopwords: &Path, names: &Path) -> Result<Self, TermsError> {
        let mut terms = Self::from_words(load_word_list(stopwords)?);
        terms.extend(load_word_list(names)?);
        Ok(terms)
    }

    /// Return a new set holding the terms of both sets.
    pub fn union(&self, other: &CommonTerms) -> Self {
        Self {
            terms: self.terms.union(&other.terms).cloned().collect(),
        }
    }

    /// Add words to the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms
            .extend(words.into_iter().filter_map(|w| normalize(w.into())));
    }

    /// Exact match: a capitalized word is not a connector.
    pub fn contains(&self, word: &str) -> bool {
        self.terms.contains(word)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Borrow the underlying set.
    pub fn as_set(&self) -> &HashSet<String> {
        &self.terms
    }

    /// Consume the wrapper and return the underlying set.
    pub fn into_set(self) -> HashSet<String> {
        self.terms
    }
}

impl<S: Into<String>> FromIterator<S> for CommonTerms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_words(iter)
    }
}

impl From<Vec<String>> for CommonTerms {
    fn from(words: Vec<String>) -> Self {
        Self::from_words(words)
    }
}

impl From<CommonTerms> for Vec<String> {
    fn from(terms: CommonTerms) -> Self {
        let mut words: Vec<String> = terms.terms.into_iter().collect();
        words.sort_unstable();
        words
    }
}

fn normalize(word: String) -> Option<String> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == word.len() && !trimmed.chars().any(char::is_uppercase) {
        Some(word)
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Read a word list: one entry per line, trimmed and lowercased.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn load_word_list(path: &Path) -> Result<Vec<String>, TermsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TermsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_word_list(&contents))
}

fn parse_word_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| normalize(line.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_contain_stopwords_and_names() {
        let terms = CommonTerms::defaults();
        assert!(terms.contains("de"));
        assert!(terms.contains("the"));
        assert!(terms.contains("marie"));
        assert!(!terms.contains("assurance"));
        assert_eq!(
            terms.len(),
            CommonTerms::builtin_stopwords()
                .union(&CommonTerms::builtin_names())
                .len()
        );
    }

    #[test]
    fn builtin_lists_have_no_duplicates() {
        assert_eq!(CommonTerms::builtin_stopwords().len(), BUILTIN_STOPWORDS.len());
        assert_eq!(CommonTerms::builtin_names().len(), BUILTIN_NAMES.len());
    }

    #[test]
    fn empty_set() {
        let terms = CommonTerms::new();
        assert!(terms.is_empty());
        assert!(!terms.contains("the"));
    }

    #[test]
    fn overriding_does_not_touch_defaults() {
        let mut custom = CommonTerms::from_words(["of", "the"]);
        custom.extend(["zzz"]);
        assert!(custom.contains("zzz"));
        assert!(!CommonTerms::defaults().contains("zzz"));
    }

    #[test]
    fn collect_into_terms() {
        let terms: CommonTerms = ["a", "b", "a"].into_iter().collect();
        assert_eq!(terms.len(), 2);
        let mut listed: Vec<&str> = terms.iter().collect();
        listed.sort_unstable();
        assert_eq!(listed, vec!["a", "b"]);
    }

    #[test]
    fn words_are_normalized_like_list_files() {
        let terms = CommonTerms::from_words(["Je", " le ", "", "  ", "de"]);
        assert_eq!(terms.len(), 3);
        assert!(terms.contains("je"));
        assert!(terms.contains("le"));
        assert!(!terms.contains("Je"));
        assert_eq!(terms, CommonTerms::from_words(parse_word_list("Je\nle\nde\n")));

        let mut extended = CommonTerms::new();
        extended.extend(["THE"]);
        assert!(extended.contains("the"));
    }

    #[test]
    fn builtin_lists_are_already_normalized() {
        for word in BUILTIN_STOPWORDS.iter().chain(BUILTIN_NAMES) {
            assert_eq!(normalize(word.to_string()).as_deref(), Some(*word));
        }
    }

    #[test]
    fn serializes_as_sorted_list() {
        let terms = CommonTerms::from_words(["le", "de"]);
        assert_eq!(serde_json::to_string(&terms).unwrap(), r#"["de","le"]"#);
        let parsed: CommonTerms = serde_json::from_str(r#"["Le", "de"]"#).unwrap();
        assert_eq!(parsed, terms);
    }

    #[test]
    fn parse_word_list_skips_comments_and_blanks() {
        let parsed = parse_word_list("# stopwords\n  Le \n\nDE\n# end\nla\n");
        assert_eq!(parsed, vec!["le", "de", "la"]);
    }

    #[test]
    fn from_files_merges_lists() {
        let dir = tempfile::tempdir().unwrap();
        let stop_path = dir.path().join("stopwords.txt");
        let names_path = dir.path().join("names.txt");
        writeln!(std::fs::File::create(&stop_path).unwrap(), "le\nla").unwrap();
        writeln!(std::fs::File::create(&names_path).unwrap(), "Marie").unwrap();

        let terms = CommonTerms::from_files(&stop_path, &names_path).unwrap();
        assert_eq!(terms.len(), 3);
        assert!(terms.contains("marie"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_word_list(Path::new("/nonexistent/words.txt")).unwrap_err();
        assert!(matches!(err, TermsError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/words.txt"));
    }
}
