//! Smith-Waterman local alignment with linear gap penalty
//!
//! The engine fills a score matrix D and a direction matrix T iteratively,
//! starts traceback at the first row-major cell holding the global maximum and
//! walks back until it reaches a zero-score cell. Every tie is broken in a fixed
//! order so repeated runs produce byte-identical output:
//!
//! - cell fill: stay-at-zero, diagonal, left, up
//! - best cell: first maximum scanning rows top to bottom, columns left to right
//! - traceback ([`TracebackPolicy::NeighborMax`]): diagonal, left, up neighbour

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::GAP;

mod matrix;
mod traceback;

use matrix::DpMatrices;

/// Errors that can occur when configuring the alignment engine
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

pub type AlignResult<T> = Result<T, AlignError>;

/// Additive scoring scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Score added for identical symbols
    pub match_score: i32,
    /// Score added for differing symbols
    pub mismatch_score: i32,
    /// Amount subtracted for each gap column
    pub gap_penalty: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_score: -1,
            gap_penalty: 3,
        }
    }
}

impl ScoringParams {
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    pub fn validate(&self) -> AlignResult<()> {
        if self.match_score <= 0 {
            return Err(AlignError::InvalidParams(format!(
                "match score must be positive, got {}",
                self.match_score
            )));
        }
        if self.gap_penalty < 0 {
            return Err(AlignError::InvalidParams(format!(
                "gap penalty is subtracted and must not be negative, got {}",
                self.gap_penalty
            )));
        }
        Ok(())
    }
}

/// How traceback picks the predecessor of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TracebackPolicy {
    /// Step to the highest-scoring neighbour (diagonal, left, up on ties).
    /// The emitted columns need not re-score to the reported score.
    #[default]
    NeighborMax,
    /// Follow the direction recorded in T while filling. The emitted columns
    /// always re-score exactly to the reported score.
    Recorded,
}

/// A local alignment between a query and a target window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    /// Query symbols of the aligned region, with `GAP` where the target has an insertion
    pub query_aligned: Vec<u8>,
    /// Target symbols of the aligned region, with `GAP` where the query has an insertion
    pub target_aligned: Vec<u8>,
    /// Best cell score of the DP matrix
    pub score: i32,
    /// Half-open range of the query covered by the alignment
    pub query_range: (usize, usize),
    /// Half-open range of the target covered by the alignment
    pub target_range: (usize, usize),
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
}

impl Alignment {
    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.query_aligned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query_aligned.is_empty()
    }

    /// Percentage of columns that are matches (0.0 to 100.0)
    pub fn identity(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        (self.matches as f32 / self.len() as f32) * 100.0
    }

    pub fn edit_distance(&self) -> u32 {
        self.mismatches + self.gaps
    }

    /// Score the emitted columns under `scoring`
    pub fn rescore(&self, scoring: &ScoringParams) -> i32 {
        self.query_aligned
            .iter()
            .zip(&self.target_aligned)
            .map(|(&a, &b)| {
                if a == GAP || b == GAP {
                    scoring.gap_penalty.saturating_neg()
                } else {
                    scoring.substitution(a, b)
                }
            })
            .fold(0i32, |acc, column| acc.saturating_add(column))
    }

    /// Both aligned sequences as text, replacing invalid UTF-8
    pub fn aligned_strings(&self) -> (String, String) {
        (
            String::from_utf8_lossy(&self.query_aligned).into_owned(),
            String::from_utf8_lossy(&self.target_aligned).into_owned(),
        )
    }
}

/// Smith-Waterman alignment engine
///
/// Holds only configuration; every call allocates its own matrices, so one
/// engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SmithWaterman {
    scoring: ScoringParams,
    traceback: TracebackPolicy,
}

impl SmithWaterman {
    /// Build an engine for `scoring`, rejecting schemes that fail [`ScoringParams::validate`]
    pub fn new(scoring: ScoringParams) -> AlignResult<Self> {
        scoring.validate()?;
        Ok(Self {
            scoring,
            traceback: TracebackPolicy::default(),
        })
    }

    pub fn with_traceback(mut self, policy: TracebackPolicy) -> Self {
        self.traceback = policy;
        self
    }

    pub fn scoring(&self) -> &ScoringParams {
        &self.scoring
    }

    pub fn traceback_policy(&self) -> TracebackPolicy {
        self.traceback
    }

    /// Best local alignment of `query` against `target`
    ///
    /// An empty input on either side yields an empty alignment with score 0.
    pub fn align(&self, query: &[u8], target: &[u8]) -> Alignment {
        if query.is_empty() || target.is_empty() {
            return Alignment::default();
        }

        let matrices = DpMatrices::fill(query, target, &self.scoring);
        let end = matrices.best_cell();
        let alignment = traceback::traceback(&matrices, query, target, end, self.traceback);

        log::trace!(
            "Aligned {} x {} symbols: score={}, columns={}",
            query.len(),
            target.len(),
            alignment.score,
            alignment.len()
        );

        alignment
    }
}

/// Align with the default scoring (+1 / -1 / gap 3) and traceback policy
pub fn smith_waterman(query: &[u8], target: &[u8]) -> Alignment {
    SmithWaterman::default().align(query, target)
}
