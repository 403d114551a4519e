//! Approximate name matching
//!
//! Similarity is the normalized Levenshtein ratio over Unicode scalar values:
//! `1 - distance / max(len_a, len_b)`. It is symmetric, deterministic and in
//! `[0, 1]`; equal strings score `1.0` and strings sharing no characters at
//! the same length score `0.0`.

use std::cmp::Ordering;

/// Similarity between two normalized keys
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// A candidate that cleared the cutoff, with its score
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub score: f64,
    pub item: T,
}

/// Ranks candidates against a query by [`similarity`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    cutoff: f64,
    limit: usize,
}

impl FuzzyMatcher {
    pub fn new(cutoff: f64, limit: usize) -> Self {
        Self { cutoff, limit }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Keep candidates scoring at least the cutoff, best first
    ///
    /// The sort is stable, so equal scores keep the order in which the
    /// candidates were supplied.
    pub fn rank<S, T, I>(&self, query: &str, candidates: I) -> Vec<Scored<T>>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, T)>,
    {
        let mut scored: Vec<Scored<T>> = candidates
            .into_iter()
            .filter_map(|(key, item)| {
                let score = similarity(query, key.as_ref());
                (score >= self.cutoff).then_some(Scored { score, item })
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(self.limit);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("shorouk", "shorouk"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);

        let score = similarity("shorouk", "shoruk");
        assert!(score > 0.5 && score < 1.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        for (a, b) in [("daral-shorouk", "shorouk"), ("نهضةمصر", "نهضه"), ("a", "")] {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_similarity_counts_chars_not_bytes() {
        assert_eq!(similarity("شروق", "شروك"), 0.75);
    }

    #[test]
    fn test_rank_applies_cutoff_and_limit() {
        let matcher = FuzzyMatcher::new(0.5, 2);
        let candidates = vec![("shorouk", 1), ("shoruk", 2), ("zzzzzzz", 3), ("shorook", 4)];

        let ranked = matcher.rank("shorouk", candidates);
        let items: Vec<i32> = ranked.iter().map(|s| s.item).collect();
        assert_eq!(items, vec![1, 2]);
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn test_rank_ties_keep_candidate_order() {
        let matcher = FuzzyMatcher::new(0.0, 10);
        let ranked = matcher.rank("ab", vec![("ax", "first"), ("xb", "second"), ("ay", "third")]);
        let items: Vec<&str> = ranked.iter().map(|s| s.item).collect();
        assert_eq!(items, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_rank_is_deterministic() {
        let matcher = FuzzyMatcher::new(0.3, 5);
        let candidates = || vec![("alpha", 1), ("alpine", 2), ("alps", 3), ("beta", 4)];
        assert_eq!(matcher.rank("alp", candidates()), matcher.rank("alp", candidates()));
    }
}
