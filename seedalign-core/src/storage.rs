//! Reference window access
//!
//! The search pipeline reads a fixed-length window of reference symbols centred
//! on every candidate offset. Windows that would run past either end of the
//! corpus are truncated rather than rejected, so callers must accept windows
//! shorter than requested (possibly empty).

use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

use crate::types::Offset;

/// Errors that can occur while accessing reference storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Random access to reference symbols by offset
pub trait StorageAccessor {
    /// Total number of symbols in the corpus
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read up to `length` symbols centred on `offset`
    ///
    /// The window starts at `offset - length / 2`; see [`window_bounds`] for
    /// how it is clipped at the corpus boundaries.
    fn fetch(&self, offset: Offset, length: usize) -> StorageResult<Vec<u8>>;
}

impl<T: StorageAccessor + ?Sized> StorageAccessor for &T {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn fetch(&self, offset: Offset, length: usize) -> StorageResult<Vec<u8>> {
        (**self).fetch(offset, length)
    }
}

/// Half-open interval of a `length`-symbol window centred on `offset`,
/// clipped to `[0, corpus_len)`
///
/// Clipping only ever shortens the window; it is never shifted to make up for
/// symbols lost at a boundary.
pub fn window_bounds(offset: Offset, length: usize, corpus_len: u64) -> (Offset, Offset) {
    let half = (length / 2) as u64;
    let start = offset.saturating_sub(half);
    let end = offset
        .saturating_add(length as u64 - half)
        .min(corpus_len);

    (start.min(end), end)
}

/// Reference corpus held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    data: Vec<u8>,
}

impl InMemoryStorage {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl StorageAccessor for InMemoryStorage {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn fetch(&self, offset: Offset, length: usize) -> StorageResult<Vec<u8>> {
        let (start, end) = window_bounds(offset, length, self.len());
        Ok(self.data[start as usize..end as usize].to_vec())
    }
}

/// Reference corpus read from a plain-text file through a memory map
///
/// Offsets address bytes of the file directly, so the file must contain the
/// bare symbol stream (no FASTA header, no line breaks inside the sequence).
pub struct MmapStorage {
    mmap: Mmap,
    len: usize,
}

impl MmapStorage {
    /// Map the whole file as the corpus
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let mmap = Self::map(path.as_ref())?;
        let len = mmap.len();
        Ok(Self { mmap, len })
    }

    /// Map the file, excluding trailing line terminators and whitespace
    pub fn open_trimmed<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let mmap = Self::map(path.as_ref())?;
        let len = mmap
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |last| last + 1);
        Ok(Self { mmap, len })
    }

    fn map(path: &Path) -> StorageResult<Mmap> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        log::debug!(
            "Memory-mapped reference {}: {} bytes",
            path.display(),
            mmap.len()
        );

        Ok(mmap)
    }

    /// The mapped corpus symbols
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap[..self.len]
    }
}

impl StorageAccessor for MmapStorage {
    fn len(&self) -> u64 {
        self.len as u64
    }

    fn fetch(&self, offset: Offset, length: usize) -> StorageResult<Vec<u8>> {
        let (start, end) = window_bounds(offset, length, self.len());
        Ok(self.as_bytes()[start as usize..end as usize].to_vec())
    }
}
