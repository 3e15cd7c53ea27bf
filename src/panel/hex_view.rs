//! Scroll state of the hex view driven by the minimap selection.

use crate::minimap::Range;

/// Visible window of the hex view, in whole rows.
///
/// Row count and width are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexView {
    /// Starting byte offset of the visible hex view (row aligned).
    scroll_offset: u64,
    visible_rows: usize,
    bytes_per_row: usize,
}

impl Default for HexView {
    fn default() -> Self {
        Self::new()
    }
}

impl HexView {
    pub fn new() -> Self {
        Self::with_layout(32, 16)
    }

    /// View showing `visible_rows` rows of `bytes_per_row` bytes each.
    pub fn with_layout(visible_rows: usize, bytes_per_row: usize) -> Self {
        Self {
            scroll_offset: 0,
            visible_rows: visible_rows.max(1),
            bytes_per_row: bytes_per_row.max(1),
        }
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Back to the top of the file.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }

    /// Get the byte range currently visible in the hex view, cut to the file.
    pub fn visible_range(&self, file_size: u64) -> Range {
        let start = self.scroll_offset.min(file_size);
        let span = (self.visible_rows as u64).saturating_mul(self.bytes_per_row as u64);
        let end = start.saturating_add(span);
        Range::new(start, end.min(file_size))
    }

    /// Last row start the view may scroll to without running past the file.
    fn max_start_row(&self, file_size: u64) -> u64 {
        let max_row = file_size.saturating_sub(1) / self.bytes_per_row as u64;
        max_row.saturating_sub(self.visible_rows.saturating_sub(1) as u64)
    }

    /// Scroll to center the given offset in the hex view.
    pub fn scroll_to(&mut self, offset: u64, file_size: u64) {
        let row = offset / self.bytes_per_row as u64;
        let center_row = self.visible_rows as u64 / 2;
        let target_row = row.saturating_sub(center_row);
        self.scroll_offset =
            target_row.min(self.max_start_row(file_size)) * self.bytes_per_row as u64;
    }

    /// Put the row containing `offset` at the top of the view.
    pub fn scroll_top(&mut self, offset: u64, file_size: u64) {
        let row = offset / self.bytes_per_row as u64;
        self.scroll_offset =
            row.min(self.max_start_row(file_size)) * self.bytes_per_row as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_to_centers_row() {
        let mut view = HexView::new();
        view.scroll_to(0x1000, 0x10000);
        // Row 256 centered in 32 rows starts at row 240.
        assert_eq!(view.scroll_offset(), 240 * 16);
        assert!(view.visible_range(0x10000).start <= 0x1000);
    }

    #[test]
    fn test_scroll_to_clamps_at_file_end() {
        let mut view = HexView::new();
        view.scroll_to(999, 1000);
        // 63 rows total, 32 visible -> last start row is 31.
        assert_eq!(view.scroll_offset(), 31 * 16);
        assert_eq!(view.visible_range(1000).end, 1000);
    }

    #[test]
    fn test_small_file_never_scrolls() {
        let mut view = HexView::new();
        view.scroll_top(40, 64);
        assert_eq!(view.scroll_offset(), 0);
        assert_eq!(view.visible_range(64), Range::new(0, 64));
    }

    #[test]
    fn test_scroll_top_aligns_to_row() {
        let mut view = HexView::new();
        view.scroll_top(0x123, 0x10000);
        assert_eq!(view.scroll_offset(), 0x120);
    }

    #[test]
    fn test_zero_width_layout_is_clamped() {
        let mut view = HexView::with_layout(32, 0);
        assert_eq!(view.bytes_per_row(), 1);
        view.scroll_to(500, 1000);
        assert_eq!(view.scroll_offset(), 500 - 16);
        view.scroll_top(999, 1000);
        assert_eq!(view.scroll_offset(), 1000 - 32);
        assert_eq!(view.visible_range(1000), Range::new(968, 1000));

        let mut empty = HexView::with_layout(0, 0);
        assert_eq!(empty.visible_rows(), 1);
        empty.scroll_top(10, 0);
        assert_eq!(empty.visible_range(0), Range::new(0, 0));
    }

    #[test]
    fn test_reset_returns_to_top() {
        let mut view = HexView::new();
        view.scroll_top(0x400, 0x10000);
        view.reset();
        assert_eq!(view.scroll_offset(), 0);
    }
}
