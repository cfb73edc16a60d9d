// Similarity engine — TF-IDF vector space plus cosine scoring.

pub mod cosine;
pub mod tfidf;

/// Default cut-off for both classification modes.
pub const DEFAULT_THRESHOLD: f64 = 0.5;
