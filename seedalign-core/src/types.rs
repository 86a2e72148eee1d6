//! Data types shared by the search stages

use crate::align::Alignment;

/// Position in the reference corpus, in symbols from its start
pub type Offset = u64;

/// Marker written into an aligned sequence where the other side has a symbol
pub const GAP: u8 = b'-';

/// A filtered seed position together with the reference window read around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Seed offset the window was centred on
    pub offset: Offset,
    /// Reference coordinate of `window[0]`
    pub window_start: Offset,
    pub window: Vec<u8>,
}

impl Candidate {
    pub fn new(offset: Offset, window_start: Offset, window: Vec<u8>) -> Self {
        Self {
            offset,
            window_start,
            window,
        }
    }

    /// Whether the storage returned fewer symbols than requested
    pub fn is_truncated(&self, requested: usize) -> bool {
        self.window.len() < requested
    }
}

/// One scored candidate, the unit the ranker orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub offset: Offset,
    pub window_start: Offset,
    pub window: Vec<u8>,
    pub score: i32,
    pub alignment: Alignment,
}

impl SearchHit {
    pub fn new(candidate: Candidate, alignment: Alignment) -> Self {
        Self {
            offset: candidate.offset,
            window_start: candidate.window_start,
            window: candidate.window,
            score: alignment.score,
            alignment,
        }
    }

    /// Half-open reference interval covered by the aligned region of the window
    pub fn reference_range(&self) -> (Offset, Offset) {
        let (start, end) = self.alignment.target_range;
        (
            self.window_start + start as Offset,
            self.window_start + end as Offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::smith_waterman;

    #[test]
    fn test_candidate_truncation() {
        let candidate = Candidate::new(3, 0, b"ACGTAC".to_vec());
        assert!(candidate.is_truncated(10));
        assert!(!candidate.is_truncated(6));
    }

    #[test]
    fn test_hit_reference_range() {
        let window = b"xxHelloyy".to_vec();
        let alignment = smith_waterman(b"Hello", &window);
        let hit = SearchHit::new(Candidate::new(104, 100, window), alignment);

        assert_eq!(hit.score, 5);
        assert_eq!(hit.reference_range(), (102, 107));
    }
}
