//! Seed location through a word index
//!
//! `locate` is the only thing the search pipeline needs from an index. The
//! in-memory `KmerIndex` here is a convenient way to build one from a
//! reference held in memory; it has no on-disk representation.

use std::collections::HashMap;

use super::{SeedError, SeedResult, WordIndex};
use crate::types::Offset;

/// Collect every reference offset associated with any of `words`
///
/// Words missing from the index are skipped. Offsets shared by several words
/// are reported once per word; collapsing them is the filter's job.
pub fn locate<I: WordIndex + ?Sized>(words: &[&[u8]], index: &I) -> Vec<Offset> {
    let mut positions = Vec::new();
    let mut misses = 0usize;

    for word in words {
        match index.lookup(word) {
            Some(offsets) => positions.extend_from_slice(offsets),
            None => misses += 1,
        }
    }

    log::trace!(
        "Located {} positions from {} words ({} not in index)",
        positions.len(),
        words.len(),
        misses
    );

    positions
}

/// Hash-based word index held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct KmerIndex {
    k: usize,
    table: HashMap<Vec<u8>, Vec<Offset>>,
}

impl KmerIndex {
    /// Create an empty index for words of length `k`
    pub fn new(k: usize) -> SeedResult<Self> {
        if k == 0 {
            return Err(SeedError::InvalidParams(
                "word length must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            k,
            table: HashMap::new(),
        })
    }

    /// Index every word of `reference`; offsets per word come out ascending
    ///
    /// A reference shorter than `k` produces an empty index.
    pub fn build(reference: &[u8], k: usize) -> SeedResult<Self> {
        let mut index = Self::new(k)?;

        for (offset, word) in reference.windows(k).enumerate() {
            index
                .table
                .entry(word.to_vec())
                .or_insert_with(Vec::new)
                .push(offset as Offset);
        }

        log::debug!(
            "Built word index: k={}, {} distinct words over {} symbols",
            k,
            index.table.len(),
            reference.len()
        );

        Ok(index)
    }

    /// Record one occurrence of `word` at `offset`
    pub fn insert(&mut self, word: &[u8], offset: Offset) -> SeedResult<()> {
        if word.len() != self.k {
            return Err(SeedError::InvalidParams(format!(
                "word of length {} does not match index word length {}",
                word.len(),
                self.k
            )));
        }

        self.table
            .entry(word.to_vec())
            .or_insert_with(Vec::new)
            .push(offset);
        Ok(())
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl WordIndex for KmerIndex {
    fn word_len(&self) -> usize {
        self.k
    }

    fn lookup(&self, word: &[u8]) -> Option<&[Offset]> {
        self.table.get(word).map(Vec::as_slice)
    }
}
