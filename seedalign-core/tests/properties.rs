use proptest::prelude::*;
use seedalign_core::{
    filter_positions, smith_waterman, words, InMemoryStorage, KmerIndex, ScoringParams,
    SearchParams, SmithWaterman, StorageAccessor, TracebackPolicy, GAP,
};

fn dna_seq(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
        min_len..=max_len,
    )
}

fn non_gap(aligned: &[u8]) -> usize {
    aligned.iter().filter(|&&b| b != GAP).count()
}

proptest! {
    #[test]
    fn word_count_matches_sequence_length(seq in dna_seq(0, 60), k in 1usize..16) {
        match words(&seq, k) {
            Ok(ws) => {
                prop_assert!(seq.len() >= k);
                prop_assert_eq!(ws.len(), seq.len() - k + 1);
                prop_assert!(ws.iter().all(|w| w.len() == k));
                prop_assert_eq!(ws[0], &seq[..k]);
            }
            Err(_) => prop_assert!(seq.len() < k),
        }
    }

    #[test]
    fn filtered_positions_are_strictly_increasing_and_stable(
        positions in proptest::collection::vec(0u64..500, 0..80),
        gap in 0u64..5,
    ) {
        let kept = filter_positions(&positions, gap);

        prop_assert!(kept.windows(2).all(|w| w[1] > w[0].saturating_add(gap)));
        prop_assert!(kept.iter().all(|p| positions.contains(p)));
        prop_assert_eq!(filter_positions(&kept, gap), kept.clone());

        // Every input offset is covered by a kept offset at or before it
        for p in &positions {
            prop_assert!(kept.iter().any(|k| k <= p));
        }
    }

    #[test]
    fn alignment_score_is_bounded(query in dna_seq(0, 40), target in dna_seq(0, 40)) {
        let result = smith_waterman(&query, &target);
        prop_assert!(result.score >= 0);
        prop_assert!(result.score as usize <= query.len().min(target.len()));
        prop_assert_eq!(result.query_aligned.len(), result.target_aligned.len());
    }

    #[test]
    fn ranges_match_aligned_symbols(query in dna_seq(1, 40), target in dna_seq(1, 40)) {
        let result = smith_waterman(&query, &target);
        let (qs, qe) = result.query_range;
        let (ts, te) = result.target_range;

        prop_assert_eq!(qe - qs, non_gap(&result.query_aligned));
        prop_assert_eq!(te - ts, non_gap(&result.target_aligned));
        prop_assert_eq!(
            result.matches + result.mismatches + result.gaps,
            result.len() as u32
        );
    }

    #[test]
    fn sequence_aligns_fully_to_itself(seq in dna_seq(1, 60)) {
        let result = smith_waterman(&seq, &seq);
        prop_assert_eq!(result.score, seq.len() as i32);
        prop_assert_eq!(&result.query_aligned, &seq);
        prop_assert_eq!(&result.target_aligned, &seq);
        prop_assert_eq!(result.query_range, (0, seq.len()));
    }

    #[test]
    fn recorded_traceback_rescores_exactly(
        query in dna_seq(1, 40),
        target in dna_seq(1, 40),
        match_score in 1i32..4,
        mismatch_score in -4i32..1,
        gap_penalty in 0i32..5,
    ) {
        let scoring = ScoringParams { match_score, mismatch_score, gap_penalty };
        let engine = SmithWaterman::new(scoring)
            .unwrap()
            .with_traceback(TracebackPolicy::Recorded);
        let result = engine.align(&query, &target);
        prop_assert_eq!(result.rescore(&scoring), result.score);
    }

    #[test]
    fn traceback_policy_never_changes_score(query in dna_seq(1, 40), target in dna_seq(1, 40)) {
        let neighbor = SmithWaterman::default().align(&query, &target);
        let recorded = SmithWaterman::default()
            .with_traceback(TracebackPolicy::Recorded)
            .align(&query, &target);
        prop_assert_eq!(neighbor.score, recorded.score);
    }

    #[test]
    fn search_hits_are_unique_and_bounded(
        reference in dna_seq(50, 400),
        start_frac in 0.0f64..1.0,
        len in 11usize..30,
    ) {
        let start = ((reference.len() - len) as f64 * start_frac) as usize;
        let query = reference[start..start + len].to_vec();

        let index = KmerIndex::build(&reference, 11).unwrap();
        let storage = InMemoryStorage::new(reference.clone());
        let params = SearchParams { top_k: 100, ..Default::default() };
        let hits = seedalign_core::align(&query, &storage, &index, &params).unwrap();

        // The query was cut from the reference, so it seeds at least once
        prop_assert!(!hits.is_empty());
        prop_assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));

        let mut offsets: Vec<u64> = hits.iter().map(|h| h.offset).collect();
        offsets.sort_unstable();
        offsets.dedup();
        prop_assert_eq!(offsets.len(), hits.len());

        for hit in &hits {
            prop_assert!(hit.window.len() <= 2 * len);
            prop_assert!(hit.window_start + hit.window.len() as u64 <= storage.len());
        }
    }
}
