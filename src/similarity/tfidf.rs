// TF-IDF vector space over normalized texts.
//
// `fit` learns a vocabulary and smoothed IDF weights from one corpus;
// `transform` projects any texts into that fixed space. Terms the fitted
// corpus never saw are dropped, so projecting the other side of a comparison
// never changes the space.
//
//   idf(t)  = ln((1 + n) / (1 + df(t))) + 1
//   w(t, d) = count(t, d) * idf(t), then each row scaled to unit length
//
// Tokens are maximal runs of ASCII alphanumerics with at least two
// characters. Normalized text is already lowercase ASCII, so this is just a
// split plus a length filter.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

/// Minimum token length that carries weight.
const MIN_TOKEN_LEN: usize = 2;

/// A sparse, row-normalized term vector. Entries are sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
}

impl TermVector {
    /// Build from (term index, weight) pairs. Zero weights are discarded.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product of two sparse vectors (merge over sorted indices).
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// A fitted vocabulary with per-term IDF weights.
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    /// term -> column index (columns follow sorted term order)
    vocabulary: HashMap<String, usize>,
    /// IDF weight per column
    idf: Vec<f64>,
    /// Number of documents the space was fitted on
    document_count: usize,
}

impl VectorSpace {
    /// Fit a space on a corpus of normalized texts.
    ///
    /// An empty corpus (or one with no usable tokens) yields an empty
    /// vocabulary; every text then projects to the zero vector.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let n = corpus.len();

        // Document frequency per term, collected in sorted order so column
        // indices are stable across runs
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in corpus {
            let unique: BTreeSet<&str> = tokenize(doc.as_ref()).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), idx);
            idf.push(((1 + n) as f64 / (1 + df) as f64).ln() + 1.0);
        }

        debug!(
            documents = n,
            vocabulary = vocabulary.len(),
            "Fitted TF-IDF vector space"
        );

        Self {
            vocabulary,
            idf,
            document_count: n,
        }
    }

    /// Project texts into this space. One unit-length (or zero) row per text.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Vec<TermVector> {
        texts.iter().map(|t| self.project(t.as_ref())).collect()
    }

    /// Project a single text.
    pub fn project(&self, text: &str) -> TermVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        TermVector::from_entries(entries)
    }

    /// Number of distinct terms in the fitted vocabulary.
    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }
}

/// Split normalized text into weighted tokens.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_chars() {
        let tokens: Vec<&str> = tokenize("b apartment 2 br 10").collect();
        assert_eq!(tokens, vec!["apartment", "br", "10"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let space = VectorSpace::fit(&["villa dubai", "apartment marina"]);
        assert_eq!(space.dimensions(), 4);
        assert_eq!(space.term_index("apartment"), Some(0));
        assert_eq!(space.term_index("dubai"), Some(1));
        assert_eq!(space.term_index("marina"), Some(2));
        assert_eq!(space.term_index("villa"), Some(3));
    }

    #[test]
    fn test_idf_smoothing() {
        let space = VectorSpace::fit(&["dubai villa", "dubai apartment"]);
        // df = 2 of n = 2 -> ln(3/3) + 1 = 1
        assert!((space.idf("dubai").unwrap() - 1.0).abs() < 1e-12);
        // df = 1 of n = 2 -> ln(3/2) + 1
        let expected = (3.0f64 / 2.0).ln() + 1.0;
        assert!((space.idf("villa").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let corpus = ["dubai marina apartment", "palm jumeirah villa villa", "downtown"];
        let space = VectorSpace::fit(&corpus);
        for row in space.transform(&corpus) {
            assert!((row.norm() - 1.0).abs() < 1e-9, "norm was {}", row.norm());
        }
    }

    #[test]
    fn test_unknown_terms_dropped() {
        let space = VectorSpace::fit(&["dubai marina"]);
        let rows = space.transform(&["weather forecast"]);
        assert!(rows[0].is_zero());
    }

    #[test]
    fn test_empty_corpus_gives_zero_vectors() {
        let empty: [&str; 0] = [];
        let space = VectorSpace::fit(&empty);
        assert_eq!(space.dimensions(), 0);
        assert!(space.project("dubai apartment").is_zero());
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let space = VectorSpace::fit(&["dubai marina", ""]);
        let rows = space.transform(&["", "dubai"]);
        assert!(rows[0].is_zero());
        assert!(!rows[1].is_zero());
    }

    #[test]
    fn test_dot_skips_unshared_terms() {
        let a = TermVector::from_entries(vec![(2, 0.6), (0, 0.8)]);
        let b = TermVector::from_entries(vec![(0, 1.0), (1, 0.0)]);
        assert!((a.dot(&b) - 0.8).abs() < 1e-12);
        assert_eq!(a.entries(), &[(0usize, 0.8), (2, 0.6)]);
        assert_eq!(b.entries().len(), 1);
    }
}
