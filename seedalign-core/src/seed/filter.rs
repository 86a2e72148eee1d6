//! Adjacency filter for seed positions
//!
//! Neighbouring words of a query that hit the same reference region produce
//! offsets one apart. Sorting and dropping every offset that sits within
//! `gap_length` of its predecessor keeps only the first offset of each run.
//! Offsets two or more apart are never merged, even when they come from the
//! same underlying hit.

use crate::types::Offset;

/// Default distance under which consecutive offsets are treated as duplicates
pub const DEFAULT_GAP_LENGTH: u64 = 1;

/// Sort `positions` and collapse runs of near-adjacent offsets
///
/// An offset is kept iff it is strictly greater than the previously scanned
/// offset plus `gap_length`. The comparison is against the previous offset
/// whether or not that one was kept, so a long run of step-one offsets
/// collapses to its first member. Exact duplicates always collapse, which
/// makes the output strictly increasing.
pub fn filter_positions(positions: &[Offset], gap_length: u64) -> Vec<Offset> {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();

    let mut kept = Vec::with_capacity(sorted.len());
    let mut last_seen: Option<Offset> = None;

    for position in sorted {
        let keep = match last_seen {
            None => true,
            Some(last) => position > last.saturating_add(gap_length),
        };

        if keep {
            kept.push(position);
        }
        last_seen = Some(position);
    }

    kept
}
