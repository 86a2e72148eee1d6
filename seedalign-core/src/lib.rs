//! seedalign Core Library
//!
//! Word seeding, adjacency filtering, reference window access, Smith-Waterman
//! local alignment and ranking for seed-and-extend search.

pub mod types;
pub mod seed;
pub mod storage;
pub mod align;
pub mod rank;
pub mod pipeline;

// Re-export commonly used types and functions
pub use types::{Candidate, Offset, SearchHit, GAP};
pub use seed::{SeedError, SeedResult, WordIndex, DEFAULT_WORD_LEN};
pub use seed::words::words;
pub use seed::locate::{locate, KmerIndex};
pub use seed::filter::{filter_positions, DEFAULT_GAP_LENGTH};
pub use storage::{window_bounds, InMemoryStorage, MmapStorage, StorageAccessor, StorageError, StorageResult};
pub use align::{smith_waterman, AlignError, Alignment, ScoringParams, SmithWaterman, TracebackPolicy};
pub use rank::{rank, RankOrder, DEFAULT_TOP_K};
pub use pipeline::{align, SearchError, SearchParams, SearchResult, Searcher};

/// Version information for the seedalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
