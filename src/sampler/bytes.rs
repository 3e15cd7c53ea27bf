//! Sampler over an in-memory or memory-mapped byte source.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;
use tracing::debug;

use super::RangeSampler;
use crate::error::{Error, Result};
use crate::minimap::Range;

/// Shared, read-only bytes. Memory maps and plain vectors both qualify.
pub type ByteSource = Arc<dyn AsRef<[u8]> + Send + Sync>;

/// Splits a file range into at most `slot_count` evenly spaced slots.
///
/// Clones share the underlying bytes; only the active range is per-clone.
#[derive(Clone)]
pub struct ByteSampler {
    source: ByteSource,
    range: Range,
    slot_count: usize,
}

impl ByteSampler {
    /// Create a sampler covering the whole source.
    pub fn new(source: ByteSource, slot_count: usize) -> Self {
        let len = (*source).as_ref().len() as u64;
        Self {
            source,
            range: Range::new(0, len),
            slot_count,
        }
    }

    /// Memory-map `path` and sample it.
    ///
    /// Empty files are rejected since there is nothing to navigate.
    pub fn open(path: &Path, slot_count: usize) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::FileSystem {
            path: path.to_path_buf(),
            operation: "open",
            source,
        })?;
        // SAFETY: the map is read-only; concurrent truncation of the file by
        // another process is outside what a viewer can guard against.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| Error::FileSystem {
            path: path.to_path_buf(),
            operation: "memory-map",
            source,
        })?;
        if mmap.is_empty() {
            return Err(Error::EmptyFile {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), size = mmap.len(), "file mapped");
        Ok(Self::from_mmap(mmap, slot_count))
    }

    /// Sampler over a memory-mapped file.
    pub fn from_mmap(mmap: Mmap, slot_count: usize) -> Self {
        Self::new(Arc::new(mmap), slot_count)
    }

    /// Sampler over an owned buffer.
    pub fn from_vec(data: Vec<u8>, slot_count: usize) -> Self {
        Self::new(Arc::new(data), slot_count)
    }

    /// Size of the whole source in bytes.
    #[inline]
    pub fn source_len(&self) -> u64 {
        self.data().len() as u64
    }

    #[inline]
    fn data(&self) -> &[u8] {
        (*self.source).as_ref()
    }

    /// Raw bytes of the active range.
    pub fn bytes(&self) -> &[u8] {
        &self.data()[self.range.start as usize..self.range.end as usize]
    }

    /// Byte value at each slot, the representation a value-mode minimap paints.
    pub fn samples(&self) -> Vec<u8> {
        let data = self.data();
        (0..self.sample_size())
            .map(|i| data[self.file_offset(i) as usize])
            .collect()
    }
}

impl RangeSampler for ByteSampler {
    fn set_range(&mut self, range: Range) {
        self.range = range.clamp_to(Range::new(0, self.source_len()));
    }

    fn range(&self) -> Range {
        self.range
    }

    fn is_empty(&self) -> bool {
        self.source_len() == 0
    }

    fn sample_size(&self) -> usize {
        let len = usize::try_from(self.range.len()).unwrap_or(usize::MAX);
        self.slot_count.min(len)
    }

    fn file_offset(&self, sample_index: usize) -> u64 {
        let slots = self.sample_size();
        if slots == 0 {
            return self.range.start;
        }
        let index = sample_index.min(slots) as u128;
        let scaled = index * u128::from(self.range.len()) / slots as u128;
        self.range.start + scaled as u64
    }
}

impl std::fmt::Debug for ByteSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteSampler")
            .field("source_len", &self.source_len())
            .field("range", &self.range)
            .field("slot_count", &self.slot_count)
            .finish()
    }
}
