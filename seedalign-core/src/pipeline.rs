//! End-to-end seed-and-extend search
//!
//! Tokenize the query, look its words up in the index, collapse adjacent
//! offsets, read a reference window around every surviving offset, align the
//! query against each window and rank the hits.
//!
//! Windows are read batch by batch on the calling thread; each batch is then
//! aligned on the rayon pool, so alignment workers never wait on storage. The
//! query is shared read-only and every alignment owns its matrices.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::align::{AlignError, ScoringParams, SmithWaterman, TracebackPolicy};
use crate::rank::{rank, RankOrder, DEFAULT_TOP_K};
use crate::seed::filter::{filter_positions, DEFAULT_GAP_LENGTH};
use crate::seed::locate::locate;
use crate::seed::words::words;
use crate::seed::{SeedError, WordIndex, DEFAULT_WORD_LEN};
use crate::storage::{window_bounds, StorageAccessor, StorageError};
use crate::types::{Candidate, Offset, SearchHit};

/// Errors that can occur during a search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Seeding error: {0}")]
    Seed(#[from] SeedError),

    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Parameters for a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Word length; must match the index
    pub word_len: usize,
    /// Number of hits to return
    pub top_k: usize,
    /// Offsets within this distance of the previous one are dropped
    pub gap_length: u64,
    /// Reference window length; twice the query length when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_len: Option<usize>,
    /// Windows read before each parallel alignment round
    pub batch_size: usize,
    /// Worker threads; 0 uses the global rayon pool
    pub threads: usize,
    pub rank_order: RankOrder,
    pub traceback: TracebackPolicy,
    pub scoring: ScoringParams,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            word_len: DEFAULT_WORD_LEN,
            top_k: DEFAULT_TOP_K,
            gap_length: DEFAULT_GAP_LENGTH,
            window_len: None,
            batch_size: 1024,
            threads: 0,
            rank_order: RankOrder::default(),
            traceback: TracebackPolicy::default(),
            scoring: ScoringParams::default(),
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> SearchResult<()> {
        if self.word_len == 0 {
            return Err(SearchError::InvalidParams(
                "word length must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(SearchError::InvalidParams(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.window_len == Some(0) {
            return Err(SearchError::InvalidParams(
                "window length must be at least 1".to_string(),
            ));
        }
        self.scoring.validate()?;
        Ok(())
    }

    /// Window length used for a query of `query_len` symbols
    pub fn window_len_for(&self, query_len: usize) -> usize {
        self.window_len.unwrap_or(2 * query_len)
    }
}

/// Reusable search configuration with its alignment engine and worker pool
pub struct Searcher {
    params: SearchParams,
    engine: SmithWaterman,
    pool: Option<rayon::ThreadPool>,
}

impl Searcher {
    pub fn new(params: SearchParams) -> SearchResult<Self> {
        params.validate()?;

        let pool = if params.threads > 0 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(params.threads)
                    .build()?,
            )
        } else {
            None
        };

        let engine = SmithWaterman::new(params.scoring)?.with_traceback(params.traceback);

        Ok(Self {
            params,
            engine,
            pool,
        })
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Run the full pipeline for `query`
    ///
    /// Fails with `SeedError::InvalidInput` before touching the index when the
    /// query is shorter than the word length. Words missing from the index and
    /// windows truncated at the corpus boundary are not errors.
    pub fn search<S, I>(&self, query: &[u8], storage: &S, index: &I) -> SearchResult<Vec<SearchHit>>
    where
        S: StorageAccessor + ?Sized,
        I: WordIndex + ?Sized,
    {
        let query_words = words(query, self.params.word_len)?;

        if index.word_len() != self.params.word_len {
            return Err(SearchError::InvalidParams(format!(
                "index word length {} does not match search word length {}",
                index.word_len(),
                self.params.word_len
            )));
        }

        let positions = locate(&query_words, index);
        let filtered = filter_positions(&positions, self.params.gap_length);
        let window_len = self.params.window_len_for(query.len());

        log::debug!(
            "{} words -> {} seed positions -> {} candidates (window {})",
            query_words.len(),
            positions.len(),
            filtered.len(),
            window_len
        );

        let mut hits = Vec::with_capacity(filtered.len());
        for batch in filtered.chunks(self.params.batch_size) {
            let candidates = fetch_candidates(batch, window_len, storage)?;
            hits.extend(self.align_candidates(query, candidates));
        }

        let ranked = rank(hits, self.params.top_k, self.params.rank_order);

        log::info!(
            "Search finished: {} candidates aligned, {} hits returned, best score {}",
            filtered.len(),
            ranked.len(),
            ranked.first().map_or(0, |hit| hit.score)
        );

        Ok(ranked)
    }

    fn align_candidates(&self, query: &[u8], candidates: Vec<Candidate>) -> Vec<SearchHit> {
        let run = || -> Vec<SearchHit> {
            candidates
                .into_par_iter()
                .map(|candidate| {
                    let alignment = self.engine.align(query, &candidate.window);
                    SearchHit::new(candidate, alignment)
                })
                .collect()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Read the reference window around every offset of `batch`
fn fetch_candidates<S>(batch: &[Offset], window_len: usize, storage: &S) -> SearchResult<Vec<Candidate>>
where
    S: StorageAccessor + ?Sized,
{
    let corpus_len = storage.len();

    batch
        .iter()
        .map(|&offset| {
            let (window_start, _) = window_bounds(offset, window_len, corpus_len);
            let candidate = Candidate::new(offset, window_start, storage.fetch(offset, window_len)?);
            if candidate.is_truncated(window_len) {
                log::trace!(
                    "Window at offset {} truncated to {} of {} symbols",
                    offset,
                    candidate.window.len(),
                    window_len
                );
            }
            Ok(candidate)
        })
        .collect()
}

/// Search `query` against a reference with a one-off [`Searcher`]
pub fn align<S, I>(
    query: &[u8],
    storage: &S,
    index: &I,
    params: &SearchParams,
) -> SearchResult<Vec<SearchHit>>
where
    S: StorageAccessor + ?Sized,
    I: WordIndex + ?Sized,
{
    Searcher::new(params.clone())?.search(query, storage, index)
}
