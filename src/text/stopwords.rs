// Stopword set — loaded once at startup and shared read-only afterwards.
//
// The default list is NLTK's English list, shipped by the `stop-words` crate
// behind its `nltk` feature. A deployment can point
// BLOGSIFT_STOPWORDS_PATH at a newline-separated file instead. Either way the
// set is built before any batch runs, so a missing or empty list stops the
// process at startup rather than on the first request.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use stop_words::{get, LANGUAGE};
use tracing::info;

/// An immutable set of lowercase stopwords.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// NLTK's English stopword list, bundled with the `stop-words` crate.
    pub fn english() -> Result<Self> {
        let words: Vec<String> = get(LANGUAGE::English);
        let stopwords = Self::from_words(words);
        if stopwords.is_empty() {
            anyhow::bail!("Bundled English stopword list is empty — cannot normalize text");
        }
        info!(words = stopwords.len(), "Loaded English stopwords");
        Ok(stopwords)
    }

    /// Read a newline-separated stopword file. Blank lines and lines starting
    /// with `#` are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword file {}", path.display()))?;

        let stopwords = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );

        if stopwords.is_empty() {
            anyhow::bail!("Stopword file {} contains no words", path.display());
        }
        info!(
            words = stopwords.len(),
            path = %path.display(),
            "Loaded custom stopwords"
        );
        Ok(stopwords)
    }

    /// Load from `path` when given, otherwise fall back to the bundled list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::english(),
        }
    }

    /// Build a set from arbitrary words. Entries are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
