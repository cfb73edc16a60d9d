// Batch pipelines — drive normalization, vector space fitting and scoring
// over whole record collections.
//
// Two entry points, each producing exactly one kind of result:
//   deduplicate   reference vs candidate corpus -> unique reference records
//   find_similar  query topic vs candidate corpus -> matching candidates

pub mod dedup;
pub mod progress;
pub mod similar;

use crate::corpus::Record;
use crate::similarity::DEFAULT_THRESHOLD;
use crate::text::Normalizer;

pub use dedup::{UniqueRecord, UniqueResult};
pub use progress::{Progress, ProgressSnapshot};
pub use similar::{SimilarMatch, SimilarResult};

/// Which side of a comparison the vector space is fitted on.
///
/// The other side is projected into that space, so terms that only appear
/// on it carry no weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FitSide {
    /// Fit on the candidate corpus (the default for both pipelines)
    #[default]
    Candidate,
    /// Fit on the reference corpus (or the query topic)
    Reference,
}

impl std::str::FromStr for FitSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "candidate" => Ok(Self::Candidate),
            "reference" => Ok(Self::Reference),
            other => anyhow::bail!("Unknown fit side '{other}' (expected candidate or reference)"),
        }
    }
}

/// Knobs shared by both pipelines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOptions {
    /// Strict cut-off: unique below it, similar above it
    pub threshold: f64,
    pub fit_side: FitSide,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fit_side: FitSide::Candidate,
        }
    }
}

/// Reference records with no close match among the candidates.
pub fn deduplicate(
    normalizer: &Normalizer,
    reference: &[Record],
    candidate: &[Record],
    options: &BatchOptions,
    progress: &Progress,
) -> UniqueResult {
    dedup::run(normalizer, reference, candidate, options, progress)
}

/// Candidate records that already cover `topic`.
pub fn find_similar(
    normalizer: &Normalizer,
    topic: &str,
    candidate: &[Record],
    options: &BatchOptions,
    progress: &Progress,
) -> SimilarResult {
    similar::run(normalizer, topic, candidate, options, progress)
}
