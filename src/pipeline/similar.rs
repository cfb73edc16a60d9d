// Similarity-search pipeline: which stored articles already cover a topic?
//
// The topic is normalized like any record text and scored against every
// candidate's "Title Meta Description". Candidates strictly above the
// threshold are returned in corpus order, keeping only the first article for
// each title.

use tracing::info;

use super::dedup::normalized_texts;
use super::progress::Progress;
use super::{BatchOptions, FitSide};
use crate::corpus::{fields, Record};
use crate::output::format_score;
use crate::similarity::cosine::{cosine, TitleFilter};
use crate::similarity::tfidf::VectorSpace;
use crate::text::Normalizer;

/// A candidate article that matches the query topic.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarMatch {
    /// The query topic as given by the caller
    pub topic: String,
    /// Raw cosine similarity, always above the threshold
    pub similarity: f64,
    /// Title of the matched article
    pub similar_title: String,
    /// The matched record exactly as it was loaded
    pub record: Record,
}

impl SimilarMatch {
    /// `Topic`, `Similarity`, `Similar Title`, then the original fields.
    pub fn to_output_row(&self) -> Record {
        self.record.with_leading(&[
            (fields::TOPIC, self.topic.clone()),
            (fields::SIMILARITY, format_score(self.similarity)),
            (fields::SIMILAR_TITLE, self.similar_title.clone()),
        ])
    }
}

/// Result of a similarity search.
#[derive(Debug, Clone)]
pub struct SimilarResult {
    pub topic: String,
    /// Matches in candidate order, at most one per title
    pub matches: Vec<SimilarMatch>,
}

impl SimilarResult {
    pub fn output_rows(&self) -> Vec<Record> {
        self.matches.iter().map(SimilarMatch::to_output_row).collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Find the candidate records similar to `topic`.
pub fn run(
    normalizer: &Normalizer,
    topic: &str,
    candidate: &[Record],
    options: &BatchOptions,
    progress: &Progress,
) -> SimilarResult {
    progress.start(candidate.len());

    let query_text = normalizer.normalize(Some(topic));
    let candidate_texts = normalized_texts(normalizer, candidate);

    let space = match options.fit_side {
        FitSide::Candidate => VectorSpace::fit(&candidate_texts),
        FitSide::Reference => VectorSpace::fit(std::slice::from_ref(&query_text)),
    };
    let query = space.project(&query_text);
    let candidate_rows = space.transform(&candidate_texts);

    let mut filter = TitleFilter::default();
    let mut matches = Vec::new();
    for (j, (row, record)) in candidate_rows.iter().zip(candidate).enumerate() {
        let score = cosine(&query, row);
        if let Some(hit) = filter.accept(j, score, record.title(), options.threshold) {
            matches.push(SimilarMatch {
                topic: topic.to_string(),
                similarity: hit.score,
                similar_title: record.title().to_string(),
                record: record.clone(),
            });
        }
        progress.advance(j + 1, matches.len());
    }

    info!(
        topic = topic,
        candidate = candidate.len(),
        vocabulary = space.dimensions(),
        matches = matches.len(),
        "Similarity search complete"
    );

    SimilarResult {
        topic: topic.to_string(),
        matches,
    }
}
