// Uniqueness pipeline: which reference articles have no close match among
// the candidates?
//
// Every record is reduced to normalized "Title Meta Description" text, a
// vector space is fitted on one side (the candidates by default), both sides
// are projected into it, and each reference row keeps its best match score.
// Rows whose best match stays under the threshold are unique and carry
// `1 - best` as their uniqueness score.

use tracing::info;

use super::progress::Progress;
use super::{BatchOptions, FitSide};
use crate::corpus::{fields, Record};
use crate::output::{format_score, OutputNames};
use crate::similarity::cosine::{classify_unique, score_row};
use crate::similarity::tfidf::VectorSpace;
use crate::text::Normalizer;

/// A reference record that has no close match on the candidate side.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueRecord {
    /// The record exactly as it was loaded
    pub record: Record,
    /// Highest similarity to any candidate
    pub best_match: f64,
    /// `1 - best_match`, always in [0, 1]
    pub uniqueness_score: f64,
}

impl UniqueRecord {
    /// The original fields followed by a `Uniqueness_Score` column.
    pub fn to_output_row(&self) -> Record {
        let mut row = self.record.clone();
        row.set(fields::UNIQUENESS_SCORE, format_score(self.uniqueness_score));
        row
    }
}

/// Result of a uniqueness run.
#[derive(Debug, Clone)]
pub struct UniqueResult {
    /// Unique reference records in reference order
    pub records: Vec<UniqueRecord>,
    /// File names the result is saved under
    pub output_names: OutputNames,
}

impl UniqueResult {
    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.uniqueness_score).collect()
    }

    pub fn output_rows(&self) -> Vec<Record> {
        self.records.iter().map(UniqueRecord::to_output_row).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Find the reference records that are unique relative to `candidate`.
pub fn run(
    normalizer: &Normalizer,
    reference: &[Record],
    candidate: &[Record],
    options: &BatchOptions,
    progress: &Progress,
) -> UniqueResult {
    progress.start(reference.len());

    let reference_texts = normalized_texts(normalizer, reference);
    let candidate_texts = normalized_texts(normalizer, candidate);

    let space = match options.fit_side {
        FitSide::Candidate => VectorSpace::fit(&candidate_texts),
        FitSide::Reference => VectorSpace::fit(&reference_texts),
    };
    let reference_rows = space.transform(&reference_texts);
    let candidate_rows = space.transform(&candidate_texts);

    let mut records = Vec::new();
    for (i, row) in reference_rows.iter().enumerate() {
        let scores = score_row(row, &candidate_rows);
        if let Some(unique) = classify_unique(i, &scores, options.threshold) {
            records.push(UniqueRecord {
                record: reference[unique.index].clone(),
                best_match: unique.best_match,
                uniqueness_score: unique.uniqueness,
            });
        }
        progress.advance(i + 1, records.len());
    }

    info!(
        reference = reference.len(),
        candidate = candidate.len(),
        vocabulary = space.dimensions(),
        unique = records.len(),
        "Uniqueness scan complete"
    );

    UniqueResult {
        records,
        output_names: OutputNames::now(),
    }
}

/// Normalized comparison text for every record, in order.
pub(crate) fn normalized_texts(normalizer: &Normalizer, records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| normalizer.normalize(Some(&r.comparison_text())))
        .collect()
}
