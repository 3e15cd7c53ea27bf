//! Offset ranges and the window arithmetic shared by every level.

use std::fmt;

/// Half-open span of absolute file offsets, `start <= end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    /// First offset covered.
    pub start: u64,
    /// One past the last offset covered.
    pub end: u64,
}

impl Range {
    /// Create a range from two offsets, swapping them if given in reverse.
    #[inline]
    pub fn new(start: u64, end: u64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Range of `len` bytes starting at `start`.
    #[inline]
    pub fn with_len(start: u64, len: u64) -> Self {
        Self {
            start,
            end: start.saturating_add(len),
        }
    }

    /// Number of offsets in the range.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Midpoint, rounded down.
    #[inline]
    pub fn center(&self) -> u64 {
        self.start + self.len() / 2
    }

    /// Whether `other` lies entirely inside this range.
    #[inline]
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Cut both ends down to `extent`.
    pub fn clamp_to(&self, extent: Range) -> Range {
        let start = self.start.clamp(extent.start, extent.end);
        let end = self.end.clamp(start, extent.end);
        Range { start, end }
    }

    /// Move the range, keeping its length, so it fits inside `extent`.
    ///
    /// A range longer than `extent` collapses to `extent` itself.
    pub fn shift_into(&self, extent: Range) -> Range {
        let len = self.len();
        if len >= extent.len() {
            return extent;
        }
        let start = self.start.clamp(extent.start, extent.end - len);
        Range::with_len(start, len)
    }

    /// Window of `size` offsets centered on `center`, shifted to lie inside `extent`.
    ///
    /// `size` must not exceed `extent.len()`.
    pub fn centered(center: u64, size: u64, extent: Range) -> Range {
        let half = size / 2;
        let start = if half > center || center - half < extent.start {
            extent.start
        } else {
            center - half
        };
        let mut window = Range::with_len(start, size);
        if window.end > extent.end {
            window = Range {
                start: extent.end - size,
                end: extent.end,
            };
        }
        window
    }

    /// Map this range from `from` onto `to`, keeping its relative position and
    /// proportion.
    ///
    /// Used when a view is retargeted but its selection should keep covering
    /// the same fraction of the view.
    pub fn rescale(&self, from: Range, to: Range) -> Range {
        if from.is_empty() {
            return Range::with_len(to.start, 0);
        }
        let project = |offset: u64| -> u64 {
            let rel = u128::from(offset.saturating_sub(from.start).min(from.len()));
            let scaled = rel * u128::from(to.len()) / u128::from(from.len());
            to.start + scaled as u64
        };
        Range::new(project(self.start), project(self.end)).clamp_to(to)
    }
}

impl From<(u64, u64)> for Range {
    fn from((start, end): (u64, u64)) -> Self {
        Range::new(start, end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}, {:#x})", self.start, self.end)
    }
}
