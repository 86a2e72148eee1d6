//! Seeding stages for seedalign
//!
//! This module turns a query into candidate reference offsets: the query is cut
//! into overlapping words, each word is looked up in a word index, and the
//! resulting offsets are collapsed so that single-symbol shifts of the same hit
//! are aligned only once.

use crate::types::Offset;

pub mod words;
pub mod locate;
pub mod filter;

/// Default word (k-mer) length for nucleotide queries
pub const DEFAULT_WORD_LEN: usize = 11;

/// Result type for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;

/// Errors that can occur during seeding
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Invalid input: query of length {len} is shorter than the word length {k}")]
    InvalidInput { len: usize, k: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Read-only word → offsets lookup over a reference corpus
///
/// The backing store is up to the implementor (in-memory table, memory-mapped
/// structure, remote key-value store). Offsets returned for a word are in no
/// particular order and may repeat across words.
pub trait WordIndex {
    /// Length of every key in the index
    fn word_len(&self) -> usize;

    /// Offsets at which `word` occurs, or `None` when the word is absent
    fn lookup(&self, word: &[u8]) -> Option<&[Offset]>;
}

impl<T: WordIndex + ?Sized> WordIndex for &T {
    fn word_len(&self) -> usize {
        (**self).word_len()
    }

    fn lookup(&self, word: &[u8]) -> Option<&[Offset]> {
        (**self).lookup(word)
    }
}
