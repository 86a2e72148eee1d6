//! Ordering and truncation of search hits

use serde::{Deserialize, Serialize};

use crate::types::SearchHit;

/// Default number of hits returned by a search
pub const DEFAULT_TOP_K: usize = 5;

/// Sort key for the final hit list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankOrder {
    /// Highest alignment score first, lower offset first on equal scores
    #[default]
    Score,
    /// Highest reference offset first, ignoring score
    Offset,
}

/// Order `hits` by `order` and keep the first `top_k`
pub fn rank(mut hits: Vec<SearchHit>, top_k: usize, order: RankOrder) -> Vec<SearchHit> {
    match order {
        RankOrder::Score => {
            hits.sort_by(|a, b| b.score.cmp(&a.score).then(a.offset.cmp(&b.offset)))
        }
        RankOrder::Offset => hits.sort_by(|a, b| b.offset.cmp(&a.offset)),
    }

    hits.truncate(top_k);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::Alignment;
    use crate::types::Candidate;

    fn hit(offset: u64, score: i32) -> SearchHit {
        let alignment = Alignment {
            score,
            ..Default::default()
        };
        SearchHit::new(Candidate::new(offset, offset, Vec::new()), alignment)
    }

    fn scores(hits: &[SearchHit]) -> Vec<i32> {
        hits.iter().map(|h| h.score).collect()
    }

    #[test]
    fn test_descending_score_top_k() {
        let ranked = rank(vec![hit(10, 7), hit(20, 3), hit(30, 9)], 2, RankOrder::Score);
        assert_eq!(scores(&ranked), vec![9, 7]);
        assert_eq!(ranked[0].offset, 30);
        assert_eq!(ranked[1].offset, 10);
    }

    #[test]
    fn test_equal_scores_ordered_by_offset() {
        let ranked = rank(
            vec![hit(90, 4), hit(15, 4), hit(40, 6), hit(2, 4)],
            DEFAULT_TOP_K,
            RankOrder::Score,
        );
        let offsets: Vec<u64> = ranked.iter().map(|h| h.offset).collect();
        assert_eq!(offsets, vec![40, 2, 15, 90]);
    }

    #[test]
    fn test_offset_order() {
        let ranked = rank(vec![hit(10, 7), hit(20, 3), hit(30, 9)], 5, RankOrder::Offset);
        let offsets: Vec<u64> = ranked.iter().map(|h| h.offset).collect();
        assert_eq!(offsets, vec![30, 20, 10]);
    }

    #[test]
    fn test_top_k_larger_than_input_and_zero() {
        assert_eq!(rank(vec![hit(1, 1)], 10, RankOrder::Score).len(), 1);
        assert!(rank(vec![hit(1, 1), hit(5, 2)], 0, RankOrder::Score).is_empty());
        assert!(rank(Vec::new(), 3, RankOrder::Score).is_empty());
    }
}
