//! Query tokenizer

use super::{SeedError, SeedResult};

/// Split `seq` into every overlapping word of length `k`, left to right
///
/// A query of exactly `k` symbols yields itself as the only word. Queries
/// shorter than `k` are rejected before any index lookup happens.
pub fn words(seq: &[u8], k: usize) -> SeedResult<Vec<&[u8]>> {
    if k == 0 {
        return Err(SeedError::InvalidParams(
            "word length must be at least 1".to_string(),
        ));
    }

    if seq.len() < k {
        return Err(SeedError::InvalidInput { len: seq.len(), k });
    }

    Ok(seq.windows(k).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_when_length_equals_k() {
        let query = b"ttttttttttt";
        let result = words(query, 11).unwrap();
        assert_eq!(result, vec![&query[..]]);
    }

    #[test]
    fn test_overlapping_words_in_order() {
        let result = words(b"ACGTACGTACGTA", 11).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], b"ACGTACGTACG");
        assert_eq!(result[1], b"CGTACGTACGT");
        assert_eq!(result[2], b"GTACGTACGTA");
    }

    #[test]
    fn test_short_query_is_invalid_input() {
        let err = words(b"ACGT", 11).unwrap_err();
        assert!(matches!(err, SeedError::InvalidInput { len: 4, k: 11 }));
    }

    #[test]
    fn test_zero_word_length_rejected() {
        assert!(matches!(
            words(b"ACGT", 0),
            Err(SeedError::InvalidParams(_))
        ));
    }
}
