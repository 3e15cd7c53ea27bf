//! Byte-range samplers feeding the minimap levels.
//!
//! A sampler exposes a fixed number of downsampled slots over a restricted
//! file range. Every minimap level owns its own clone so each can be narrowed
//! independently.

mod bytes;

pub use bytes::{ByteSampler, ByteSource};

use crate::minimap::Range;

/// Downsampled access to a range of a byte source.
pub trait RangeSampler: Clone {
    /// Restrict the sampler to `range` (absolute file offsets).
    fn set_range(&mut self, range: Range);

    /// Currently active range.
    fn range(&self) -> Range;

    /// Whether the sampler has no data at all.
    fn is_empty(&self) -> bool;

    /// Number of slots the active range is split into.
    fn sample_size(&self) -> usize;

    /// Absolute offset of slot `sample_index`.
    ///
    /// `file_offset(sample_size())` is the end of the active range.
    fn file_offset(&self, sample_index: usize) -> u64;
}
