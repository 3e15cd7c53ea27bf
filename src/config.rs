//! Tunables for a minimap hierarchy.

use crate::error::{Error, Result};

/// Smallest window an automatically built level may show, as a fraction of
/// its parent's window.
pub const DEFAULT_MIN_SELECTION_FRACTION: f64 = 0.1;

/// Selection size of the finest level of a default ladder.
pub const DEFAULT_LADDER_SELECTION_SIZE: u64 = 4096;

/// Size ratio between consecutive levels of a default ladder.
pub const DEFAULT_LADDER_GROW_FACTOR: f64 = 4.0;

/// Slots per minimap.
pub const DEFAULT_SAMPLE_COUNT: usize = 1024;

/// Per-hierarchy configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HierarchyConfig {
    /// Lower bound on `window / parent window` when partitioning a range.
    /// Must lie in `(0, 1)`.
    pub min_selection_fraction: f64,
    /// Finest selection size used by [`MinimapPanel::request_ladder`](crate::panel::MinimapPanel::request_ladder).
    pub ladder_selection_size: u64,
    /// Growth factor used by the default ladder, greater than 1.
    pub ladder_grow_factor: f64,
    /// Number of slots each sampler is split into.
    pub sample_count: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            min_selection_fraction: DEFAULT_MIN_SELECTION_FRACTION,
            ladder_selection_size: DEFAULT_LADDER_SELECTION_SIZE,
            ladder_grow_factor: DEFAULT_LADDER_GROW_FACTOR,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl HierarchyConfig {
    /// Check every field against its domain.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.min_selection_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(Error::config(
                "min_selection_fraction",
                format!("{fraction} is not in (0, 1)"),
            ));
        }
        if !(self.ladder_grow_factor > 1.0) {
            return Err(Error::config(
                "ladder_grow_factor",
                format!("{} must be greater than 1", self.ladder_grow_factor),
            ));
        }
        if self.ladder_selection_size == 0 {
            return Err(Error::config("ladder_selection_size", "must be non-zero"));
        }
        if self.sample_count == 0 {
            return Err(Error::config("sample_count", "must be non-zero"));
        }
        Ok(())
    }

    /// Minimum window for a parent window of `extent_len` offsets.
    #[inline]
    pub fn min_window(&self, extent_len: u64) -> u64 {
        (self.min_selection_fraction * extent_len as f64).ceil() as u64
    }
}
