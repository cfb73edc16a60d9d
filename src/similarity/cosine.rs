// Pairwise cosine scoring and the two classification modes built on it.
//
// Rows coming out of `VectorSpace::transform` are unit length (or zero), so
// cosine similarity is a plain dot product. Term weights are non-negative,
// which keeps every score in [0, 1]; the clamp only absorbs rounding.
//
// Both modes preserve row order and apply their threshold strictly:
//   uniqueness: row i is unique iff max_j score[i][j] < threshold
//   search:     candidate j matches iff score[j] > threshold, first title wins

use std::collections::HashSet;

use super::tfidf::TermVector;

/// Cosine similarity between two unit-or-zero rows.
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    a.dot(b).clamp(0.0, 1.0)
}

/// Scores of one query row against every candidate, in candidate order.
pub fn score_row(query: &TermVector, candidates: &[TermVector]) -> Vec<f64> {
    candidates.iter().map(|c| cosine(query, c)).collect()
}

/// Full score matrix: `matrix[i][j] = cosine(reference[i], candidates[j])`.
pub fn score_matrix(reference: &[TermVector], candidates: &[TermVector]) -> Vec<Vec<f64>> {
    reference.iter().map(|r| score_row(r, candidates)).collect()
}

/// Best match score for one row; 0.0 when there are no candidates.
pub fn best_score(row: &[f64]) -> f64 {
    row.iter().copied().fold(0.0, f64::max)
}

/// A reference row classified as unique.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniqueRow {
    /// Row index in the reference corpus
    pub index: usize,
    /// Highest similarity to any candidate
    pub best_match: f64,
    /// `1 - best_match`
    pub uniqueness: f64,
}

/// Classify a single row in uniqueness mode.
pub fn classify_unique(index: usize, row: &[f64], threshold: f64) -> Option<UniqueRow> {
    let best = best_score(row);
    (best < threshold).then(|| UniqueRow {
        index,
        best_match: best,
        uniqueness: 1.0 - best,
    })
}

/// A candidate accepted in similarity-search mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Column index in the candidate corpus
    pub index: usize,
    /// Raw cosine similarity to the query
    pub score: f64,
}

/// Tracks which titles have already been accepted in search mode.
#[derive(Debug, Default)]
pub struct TitleFilter {
    seen: HashSet<String>,
}

impl TitleFilter {
    /// Accept candidate `index` if it clears the threshold and its title has
    /// not been accepted before. Rejected candidates do not claim their title.
    pub fn accept(&mut self, index: usize, score: f64, title: &str, threshold: f64) -> Option<SearchHit> {
        if score > threshold && self.seen.insert(title.to_string()) {
            Some(SearchHit { index, score })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(entries: &[(usize, f64)]) -> TermVector {
        let norm: f64 = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        TermVector::from_entries(entries.iter().map(|&(i, w)| (i, w / norm)).collect())
    }

    #[test]
    fn test_identical_rows_score_one() {
        let a = unit(&[(0, 1.0), (3, 2.0)]);
        assert!((cosine(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_rows_score_zero() {
        let a = unit(&[(0, 1.0)]);
        let b = unit(&[(1, 1.0)]);
        assert_eq!(cosine(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let a = unit(&[(0, 1.0)]);
        assert_eq!(cosine(&a, &TermVector::default()), 0.0);
    }

    #[test]
    fn test_matrix_shape() {
        let refs = vec![unit(&[(0, 1.0)]), unit(&[(1, 1.0)])];
        let cands = vec![unit(&[(0, 1.0)]), unit(&[(0, 1.0), (1, 1.0)]), unit(&[(2, 1.0)])];
        let m = score_matrix(&refs, &cands);
        assert_eq!(m.len(), 2);
        assert!(m.iter().all(|row| row.len() == 3));
        assert!((m[0][0] - 1.0).abs() < 1e-12);
        assert!((m[1][1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_best_score_empty_row_is_zero() {
        assert_eq!(best_score(&[]), 0.0);
    }

    #[test]
    fn test_unique_threshold_is_strict() {
        assert!(classify_unique(0, &[0.5], 0.5).is_none());
        assert!(classify_unique(2, &[0.9, 0.1], 0.5).is_none());
        let row = classify_unique(1, &[0.49], 0.5).unwrap();
        assert_eq!(row.index, 1);
        assert!((row.uniqueness - 0.51).abs() < 1e-12);
    }

    #[test]
    fn test_search_threshold_is_strict() {
        let mut filter = TitleFilter::default();
        assert_eq!(filter.accept(0, 0.5, "a", 0.5), None);
        assert_eq!(
            filter.accept(1, 0.51, "b", 0.5),
            Some(SearchHit { index: 1, score: 0.51 })
        );
    }

    #[test]
    fn test_search_first_title_wins() {
        let mut filter = TitleFilter::default();
        let hits: Vec<usize> = [(0.7, "X"), (0.9, "X"), (0.8, "Y")]
            .iter()
            .enumerate()
            .filter_map(|(j, &(score, title))| filter.accept(j, score, title, 0.5))
            .map(|h| h.index)
            .collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_search_rejected_row_does_not_claim_title() {
        let mut filter = TitleFilter::default();
        assert!(filter.accept(0, 0.2, "X", 0.5).is_none());
        assert_eq!(filter.accept(1, 0.9, "X", 0.5).map(|h| h.index), Some(1));
    }
}
