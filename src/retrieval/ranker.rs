//! Cosine-similarity ranking of a query against every document.

use super::index::DocumentVector;
use super::sparse::SparseVector;
use super::vectorizer::QueryVector;

/// A document position and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub index: usize,
    pub score: f64,
}

/// Cosine similarity from precomputed norms; 0.0 when either norm is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// The most similar document, earliest on ties.
///
/// Returns `None` when no document scores above zero.
pub fn best_match(query: &QueryVector, documents: &[DocumentVector]) -> Option<Match> {
    let mut best: Option<Match> = None;
    let mut best_score = 0.0f64;
    for (index, doc) in documents.iter().enumerate() {
        let score = cosine_similarity(&query.vector, &doc.vector, query.norm, doc.norm);
        if score > best_score {
            best_score = score;
            best = Some(Match { index, score });
        }
    }
    best
}

/// Up to `top_k` documents with positive similarity, best first.
/// Equal scores keep corpus order.
pub fn rank(query: &QueryVector, documents: &[DocumentVector], top_k: usize) -> Vec<Match> {
    let mut scored: Vec<Match> = documents
        .iter()
        .enumerate()
        .map(|(index, doc)| Match {
            index,
            score: cosine_similarity(&query.vector, &doc.vector, query.norm, doc.norm),
        })
        .filter(|m| m.score > 0.0)
        .collect();

    // Stable sort keeps the earlier document first among equal scores.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: Vec<(u32, f64)>) -> DocumentVector {
        let vector = SparseVector::from_pairs(pairs);
        let norm = vector.norm();
        DocumentVector { vector, norm }
    }

    fn query(pairs: Vec<(u32, f64)>) -> QueryVector {
        let vector = SparseVector::from_pairs(pairs);
        let norm = vector.norm();
        QueryVector {
            vector,
            norm,
            unknown_terms: 0,
        }
    }

    #[test]
    fn test_cosine_zero_norm() {
        let a = SparseVector::from_pairs(vec![(0, 1.0)]);
        let empty = SparseVector::default();
        assert_eq!(cosine_similarity(&a, &empty, 1.0, 0.0), 0.0);
        assert_eq!(cosine_similarity(&empty, &a, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_cosine_self_similarity() {
        let a = SparseVector::from_pairs(vec![(0, 2.0), (4, 3.5)]);
        let n = a.norm();
        assert!((cosine_similarity(&a, &a, n, n) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let docs = vec![doc(vec![(1, 1.0)]), doc(vec![(0, 1.0), (1, 0.1)]), doc(vec![(2, 1.0)])];
        let m = best_match(&query(vec![(0, 1.0)]), &docs).unwrap();
        assert_eq!(m.index, 1);
    }

    #[test]
    fn test_best_match_first_wins_on_tie() {
        let docs = vec![doc(vec![(5, 1.0)]), doc(vec![(0, 2.0)]), doc(vec![(0, 1.0)])];
        let m = best_match(&query(vec![(0, 1.0)]), &docs).unwrap();
        assert_eq!(m.index, 1);
        assert!((m.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_match_none_without_overlap() {
        let docs = vec![doc(vec![(1, 1.0)])];
        assert!(best_match(&query(vec![(0, 1.0)]), &docs).is_none());
        assert!(best_match(&query(vec![(0, 1.0)]), &[]).is_none());
    }

    #[test]
    fn test_rank_orders_and_truncates() {
        let docs = vec![
            doc(vec![(0, 1.0), (1, 1.0)]),
            doc(vec![(0, 1.0)]),
            doc(vec![(2, 1.0)]),
            doc(vec![(0, 3.0)]),
        ];
        let ranked = rank(&query(vec![(0, 1.0)]), &docs, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[1].index, 3);

        let all = rank(&query(vec![(0, 1.0)]), &docs, 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].index, 0);
    }
}
