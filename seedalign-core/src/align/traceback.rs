use super::matrix::{DpMatrices, Direction};
use super::{Alignment, TracebackPolicy};
use crate::types::GAP;

/// Walk back from `end` until a zero-score cell and build the gapped pair
pub(crate) fn traceback(
    matrices: &DpMatrices,
    query: &[u8],
    target: &[u8],
    end: (usize, usize),
    policy: TracebackPolicy,
) -> Alignment {
    let (mut i, mut j) = end;
    let mut query_aligned = Vec::new();
    let mut target_aligned = Vec::new();
    let mut matches = 0u32;
    let mut mismatches = 0u32;
    let mut gaps = 0u32;

    while matrices.score(i, j) != 0 {
        let step = match policy {
            TracebackPolicy::NeighborMax => matrices.best_neighbor(i, j),
            TracebackPolicy::Recorded => matrices.direction(i, j),
        };

        match step {
            Direction::Diagonal => {
                let (a, b) = (query[i - 1], target[j - 1]);
                if a == b {
                    matches += 1;
                } else {
                    mismatches += 1;
                }
                query_aligned.push(a);
                target_aligned.push(b);
                i -= 1;
                j -= 1;
            }
            Direction::Left => {
                query_aligned.push(GAP);
                target_aligned.push(target[j - 1]);
                gaps += 1;
                j -= 1;
            }
            Direction::Up => {
                query_aligned.push(query[i - 1]);
                target_aligned.push(GAP);
                gaps += 1;
                i -= 1;
            }
            // A positive cell never records Stop
            Direction::Stop => break,
        }
    }

    query_aligned.reverse();
    target_aligned.reverse();

    Alignment {
        query_aligned,
        target_aligned,
        score: matrices.score(end.0, end.1),
        query_range: (i, end.0),
        target_range: (j, end.1),
        matches,
        mismatches,
        gaps,
    }
}
