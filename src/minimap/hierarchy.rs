//! Coordinator for a cascade of minimaps, coarsest first.
//!
//! Level `i`'s selected range is the zoom target shown by level `i + 1`.
//! Selection changes on intermediate levels retarget the next level; only the
//! finest level's selection is reported to the owner.

use tracing::{debug, trace, warn};

use super::level::{Level, MinimapColor, MinimapMode};
use super::range::Range;
use crate::config::HierarchyConfig;
use crate::sampler::RangeSampler;

/// Emitted when the finest level's selection changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionChanged {
    pub range: Range,
}

/// Ordered minimap levels plus the shared display mode.
///
/// Always holds at least one level. Each level owns its sampler clone, so
/// dropping a level releases its sampler with it.
#[derive(Debug)]
pub struct MinimapHierarchy<S> {
    levels: Vec<Level<S>>,
    full: Range,
    mode: MinimapMode,
    selection: Range,
    config: HierarchyConfig,
    events: Vec<SelectionChanged>,
}

impl<S: RangeSampler> MinimapHierarchy<S> {
    /// Single-level hierarchy over `sampler`.
    pub fn new(sampler: S, config: HierarchyConfig) -> Self {
        let full = full_extent(&sampler);
        let mode = MinimapMode::default();
        Self {
            levels: vec![Level::new(sampler, mode)],
            full,
            mode,
            selection: full,
            config,
            events: Vec::new(),
        }
    }

    /// Swap in a new byte source; the hierarchy collapses to one level
    /// covering it.
    pub fn set_sampler(&mut self, sampler: S) {
        self.truncate(1);
        self.full = full_extent(&sampler);
        self.levels[0].set_sampler(sampler);
        self.selection = self.levels[0].range();
        debug!(full = %self.full, "minimap sampler replaced");
    }

    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// All levels, coarsest first.
    pub fn levels(&self) -> &[Level<S>] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level<S>> {
        self.levels.get(index)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Whole navigable extent.
    pub fn full_range(&self) -> Range {
        self.full
    }

    /// Final selection, as last reported by the finest level.
    pub fn selection(&self) -> Range {
        self.selection
    }

    /// Whether `remove_level` would do anything.
    pub fn can_remove(&self) -> bool {
        self.levels.len() > 1
    }

    pub fn mode(&self) -> MinimapMode {
        self.mode
    }

    pub fn color(&self) -> MinimapColor {
        self.mode.color()
    }

    /// Drain selection events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<SelectionChanged> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    // -------------------------------------------------------------------------
    // Level management
    // -------------------------------------------------------------------------

    /// Append a finer level zoomed on the current finest selection.
    pub fn add_level(&mut self) {
        let parent = &self.levels[self.last_index()];
        let mut sampler = parent.sampler().clone();
        sampler.set_range(parent.selected_range());
        self.levels.push(Level::new(sampler, self.mode));
        debug!(levels = self.levels.len(), "minimap level added");
    }

    /// Drop the finest level and report the new finest selection.
    ///
    /// Returns `false` and changes nothing when only one level is left.
    pub fn remove_level(&mut self) -> bool {
        if !self.can_remove() {
            return false;
        }
        self.levels.pop();
        self.levels.iter_mut().for_each(Level::refresh);
        debug!(levels = self.levels.len(), "minimap level removed");

        let selection = self.levels[self.last_index()].selected_range();
        self.report(selection);
        true
    }

    /// Drop levels beyond `len` without reporting intermediate selections.
    fn truncate(&mut self, len: usize) {
        let len = len.max(1);
        if self.levels.len() > len {
            self.levels.truncate(len);
            self.levels.iter_mut().for_each(Level::refresh);
            debug!(levels = len, "minimap hierarchy trimmed");
        }
    }

    /// Apply `mode` and its color to every level.
    pub fn set_mode(&mut self, mode: MinimapMode) {
        self.mode = mode;
        let color = mode.color();
        for level in &mut self.levels {
            level.set_color(color);
            level.set_mode(mode);
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    // -------------------------------------------------------------------------
    // Selection propagation
    // -------------------------------------------------------------------------

    /// Handle a selection change raised by level `index`.
    ///
    /// An intermediate level retargets the next level's view, keeping that
    /// level's selection proportions. The finest level's selection becomes the
    /// hierarchy's selection and is reported.
    pub fn update_selection(&mut self, index: usize, range: Range) {
        let last = self.last_index();
        if index == last {
            self.report(range);
        } else if index < last {
            self.levels[index + 1].set_range(range, false);
        } else {
            warn!(index, levels = self.levels.len(), "selection from unknown level ignored");
        }
    }

    /// A user drag on level `index`: store the selection and propagate it.
    pub fn user_select(&mut self, index: usize, range: Range) {
        let Some(level) = self.levels.get_mut(index) else {
            warn!(index, "selection on unknown level ignored");
            return;
        };
        level.set_selected_range(range);
        let selected = level.selected_range();
        self.update_selection(index, selected);
    }

    fn report(&mut self, range: Range) {
        self.selection = range;
        self.events.push(SelectionChanged { range });
    }

    // -------------------------------------------------------------------------
    // Range partitioning
    // -------------------------------------------------------------------------

    /// Build a chain of nested windows ending exactly on `target`.
    ///
    /// Each level's window is centered on the target and is at least
    /// `min_selection_fraction` of its parent's window, so every step zooms by
    /// a bounded factor. Levels are added or trimmed to fit the chain. The
    /// target is expected to lie inside [`full_range`](Self::full_range).
    pub fn select_range(&mut self, target: Range) {
        let target = target.clamp_to(self.full);
        let size = target.len();
        let center = target.center();

        let mut extent = self.full;
        let mut index = 0;
        self.levels[0].set_range(extent, false);

        loop {
            let window_size = size.max(self.config.min_window(extent.len()));
            if window_size == size || window_size >= extent.len() {
                break;
            }
            let window = Range::centered(center, window_size, extent);
            trace!(index, %extent, %window, "partition step");

            self.levels[index].set_selected_range(window);
            if index == self.last_index() {
                self.add_level();
            } else {
                self.levels[index + 1].set_range(window, false);
            }
            extent = window;
            index += 1;
        }

        self.truncate(index + 1);
        self.levels[index].set_selected_range(target);
        debug!(%target, levels = self.levels.len(), "range partitioned");
        self.update_selection(index, target);
    }

    // -------------------------------------------------------------------------
    // Ladder
    // -------------------------------------------------------------------------

    /// Reset levels to a zoom ladder anchored at the start of the file.
    ///
    /// The finest level selects `selection_size` bytes; each coarser level is
    /// `grow_factor` times larger until one covers the whole file.
    pub fn create_ladder(&mut self, selection_size: u64, grow_factor: f64) {
        let full_size = self.full.len();
        let mut view_sizes = Vec::new();
        let mut selection_sizes = Vec::new();
        let mut size = selection_size.clamp(1, full_size.max(1));
        loop {
            selection_sizes.push(size.min(full_size));
            let grown = (size as f64 * grow_factor) as u64;
            size = grown.max(size.saturating_add(1)).min(full_size);
            view_sizes.push(size);
            if size >= full_size {
                break;
            }
        }

        let count = view_sizes.len();
        for index in 0..count {
            if index == self.levels.len() {
                self.add_level();
            }
            let rung = count - index - 1;
            let level = &mut self.levels[index];
            level.set_range(Range::with_len(self.full.start, view_sizes[rung]), true);
            level.set_selected_range(Range::with_len(self.full.start, selection_sizes[rung]));
        }
        self.truncate(count);
        debug!(levels = count, selection_size, grow_factor, "minimap ladder created");

        let last = self.last_index();
        let selection = self.levels[last].selected_range();
        self.update_selection(last, selection);
    }

    // -------------------------------------------------------------------------
    // Scroll
    // -------------------------------------------------------------------------

    /// Realign levels, finest first, so their selections start at `start`.
    ///
    /// Each level moves its view in steps of its unselected margin and keeps
    /// its view and selection sizes; the new view start becomes the target of
    /// the next coarser level. The walk stops at the first level already
    /// aligned, or at a level whose selection fills its view. Finer levels are
    /// not revisited.
    pub fn scroll_to(&mut self, start: u64) {
        let full = self.full;
        let mut start = start;
        for index in (0..self.levels.len()).rev() {
            let level = &mut self.levels[index];
            let view = level.range();
            let selected = level.selected_range();
            if selected.start == start {
                break;
            }

            let margin = view.len() - selected.len();
            if margin == 0 {
                trace!(index, "selection fills view, scroll stops");
                break;
            }
            let offset = start % margin;
            let new_view = Range::with_len(start - offset, view.len()).shift_into(full);
            let selection_start = start.clamp(new_view.start, new_view.end - selected.len());
            trace!(index, start, offset, view = %new_view, "scroll step");

            level.set_range(new_view, true);
            level.set_selected_range(Range::with_len(selection_start, selected.len()));
            start = new_view.start;
        }
    }
}

/// Extent a sampler can reach: from its first slot to the end of its last.
fn full_extent<S: RangeSampler>(sampler: &S) -> Range {
    Range::new(sampler.file_offset(0), sampler.file_offset(sampler.sample_size()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::ByteSampler;

    fn hierarchy(len: usize) -> MinimapHierarchy<ByteSampler> {
        let sampler = ByteSampler::from_vec(vec![0xAA; len], 64);
        MinimapHierarchy::new(sampler, HierarchyConfig::default())
    }

    fn views(h: &MinimapHierarchy<ByteSampler>) -> Vec<(Range, Range)> {
        h.levels()
            .iter()
            .map(|l| (l.range(), l.selected_range()))
            .collect()
    }

    #[test]
    fn test_new_hierarchy_has_one_level() {
        let h = hierarchy(1000);
        assert_eq!(h.level_count(), 1);
        assert_eq!(h.full_range(), Range::new(0, 1000));
        assert_eq!(h.selection(), Range::new(0, 1000));
        assert!(!h.can_remove());
    }

    #[test]
    fn test_add_level_zooms_on_selection() {
        let mut h = hierarchy(1000);
        h.user_select(0, Range::new(100, 300));
        h.add_level();
        assert_eq!(h.level_count(), 2);
        let level = h.level(1).unwrap();
        assert_eq!(level.range(), Range::new(100, 300));
        assert_eq!(level.sampler().range(), Range::new(100, 300));
        assert!(h.can_remove());
    }

    #[test]
    fn test_remove_sole_level_is_noop() {
        let mut h = hierarchy(1000);
        h.user_select(0, Range::new(10, 20));
        h.take_events();
        let before = views(&h);
        let selection = h.selection();

        assert!(!h.remove_level());
        assert_eq!(views(&h), before);
        assert_eq!(h.selection(), selection);
        assert!(h.take_events().is_empty());
    }

    #[test]
    fn test_remove_level_reports_new_finest_selection() {
        let mut h = hierarchy(1000);
        h.user_select(0, Range::new(100, 300));
        h.add_level();
        h.user_select(1, Range::new(150, 160));
        h.take_events();

        assert!(h.remove_level());
        assert_eq!(h.level_count(), 1);
        assert_eq!(h.selection(), Range::new(100, 300));
        assert_eq!(
            h.take_events(),
            vec![SelectionChanged {
                range: Range::new(100, 300)
            }]
        );
    }

    #[test]
    fn test_intermediate_selection_only_retargets_next_view() {
        let mut h = hierarchy(1000);
        h.user_select(0, Range::new(0, 400));
        h.add_level();
        h.user_select(1, Range::new(100, 200));
        h.take_events();
        let reported = h.selection();

        h.user_select(0, Range::new(400, 800));
        let level = h.level(1).unwrap();
        assert_eq!(level.range(), Range::new(400, 800));
        // Same quarter of the view stays selected.
        assert_eq!(level.selected_range(), Range::new(500, 600));
        assert_eq!(h.selection(), reported);
        assert!(h.take_events().is_empty());
    }

    #[test]
    fn test_last_level_selection_is_reported() {
        let mut h = hierarchy(1000);
        h.user_select(0, Range::new(5, 50));
        assert_eq!(h.selection(), Range::new(5, 50));
        assert_eq!(
            h.take_events(),
            vec![SelectionChanged {
                range: Range::new(5, 50)
            }]
        );
    }

    #[test]
    fn test_select_range_example() {
        let mut h = hierarchy(1000);
        h.select_range(Range::new(450, 460));

        assert_eq!(h.level_count(), 2);
        assert_eq!(h.level(0).unwrap().range(), Range::new(0, 1000));
        assert_eq!(h.level(0).unwrap().selected_range(), Range::new(405, 505));
        assert_eq!(h.level(1).unwrap().range(), Range::new(405, 505));
        assert_eq!(h.level(1).unwrap().selected_range(), Range::new(450, 460));
        assert_eq!(h.selection(), Range::new(450, 460));
    }

    #[test]
    fn test_select_range_trims_extra_levels() {
        let mut h = hierarchy(1_000_000);
        h.select_range(Range::new(500_000, 500_001));
        let deep = h.level_count();
        assert!(deep > 3);

        h.select_range(Range::new(0, 500_000));
        assert_eq!(h.level_count(), 1);
        assert_eq!(h.level(0).unwrap().selected_range(), Range::new(0, 500_000));
    }

    #[test]
    fn test_select_range_reuses_existing_levels() {
        let mut h = hierarchy(1000);
        for _ in 0..4 {
            h.add_level();
        }
        h.select_range(Range::new(990, 1000));
        assert_eq!(h.level_count(), 2);
        assert_eq!(h.level(0).unwrap().selected_range(), Range::new(900, 1000));
        assert_eq!(h.level(1).unwrap().range(), Range::new(900, 1000));
        assert_eq!(h.level(1).unwrap().selected_range(), Range::new(990, 1000));
    }

    #[test]
    fn test_select_empty_range_terminates() {
        let mut h = hierarchy(1000);
        h.select_range(Range::new(333, 333));
        let finest = h.levels().last().unwrap();
        assert_eq!(finest.selected_range(), Range::new(333, 333));
        assert!(finest.range().contains(&Range::new(333, 333)));
    }

    #[test]
    fn test_select_whole_file_uses_one_level() {
        let mut h = hierarchy(1000);
        h.add_level();
        h.select_range(Range::new(0, 1000));
        assert_eq!(h.level_count(), 1);
        assert_eq!(h.selection(), Range::new(0, 1000));
    }

    #[test]
    fn test_select_range_emits_single_event() {
        let mut h = hierarchy(100_000);
        h.select_range(Range::new(10, 20));
        assert_eq!(
            h.take_events(),
            vec![SelectionChanged {
                range: Range::new(10, 20)
            }]
        );
    }

    #[test]
    fn test_ladder_sizes() {
        let mut h = hierarchy(1000);
        h.create_ladder(10, 4.0);
        // 10 -> 40 -> 160 -> 640 -> 1000
        let expected = vec![
            (Range::new(0, 1000), Range::new(0, 640)),
            (Range::new(0, 640), Range::new(0, 160)),
            (Range::new(0, 160), Range::new(0, 40)),
            (Range::new(0, 40), Range::new(0, 10)),
        ];
        assert_eq!(views(&h), expected);
        assert_eq!(h.selection(), Range::new(0, 10));
    }

    #[test]
    fn test_ladder_trims_levels() {
        let mut h = hierarchy(1000);
        h.create_ladder(10, 4.0);
        h.create_ladder(500, 4.0);
        assert_eq!(
            views(&h),
            vec![(Range::new(0, 1000), Range::new(0, 500))]
        );
    }

    #[test]
    fn test_ladder_larger_than_file() {
        let mut h = hierarchy(100);
        h.create_ladder(4096, 2.0);
        assert_eq!(views(&h), vec![(Range::new(0, 100), Range::new(0, 100))]);
    }

    #[test]
    fn test_ladder_with_huge_selection_size() {
        let mut h = hierarchy(1000);
        h.create_ladder(10, 4.0);
        h.create_ladder(u64::MAX, 4.0);
        assert_eq!(views(&h), vec![(Range::new(0, 1000), Range::new(0, 1000))]);
        assert_eq!(h.selection(), Range::new(0, 1000));
    }

    #[test]
    fn test_scroll_to_realigns_levels() {
        let mut h = hierarchy(1000);
        h.create_ladder(10, 4.0);
        h.scroll_to(100);

        let finest = h.levels().last().unwrap();
        assert_eq!(finest.selected_range(), Range::new(100, 110));
        // 100 % (40 - 10) = 10
        assert_eq!(finest.range(), Range::new(90, 130));

        let parent = h.level(h.level_count() - 2).unwrap();
        assert_eq!(parent.selected_range().start, 90);
        assert!(parent.range().contains(&parent.selected_range()));
    }

    #[test]
    fn test_scroll_to_is_idempotent() {
        let mut h = hierarchy(1000);
        h.create_ladder(10, 4.0);
        h.scroll_to(777);
        let once = views(&h);
        h.scroll_to(777);
        assert_eq!(views(&h), once);
    }

    #[test]
    fn test_scroll_to_stops_when_selection_fills_view() {
        let mut h = hierarchy(1000);
        let before = views(&h);
        h.scroll_to(500);
        assert_eq!(views(&h), before);
    }

    #[test]
    fn test_scroll_near_end_stays_in_file() {
        let mut h = hierarchy(1000);
        h.create_ladder(10, 4.0);
        h.scroll_to(995);
        for level in h.levels() {
            assert!(h.full_range().contains(&level.range()));
            assert!(level.range().contains(&level.selected_range()));
        }
    }

    #[test]
    fn test_toggle_mode_recolors_every_level() {
        let mut h = hierarchy(1000);
        h.add_level();
        h.toggle_mode();
        assert_eq!(h.mode(), MinimapMode::Entropy);
        for level in h.levels() {
            assert_eq!(level.mode(), MinimapMode::Entropy);
            assert_eq!(level.color(), MinimapColor::Red);
        }
        h.add_level();
        assert_eq!(h.levels().last().unwrap().color(), MinimapColor::Red);
    }

    #[test]
    fn test_set_sampler_resets_to_one_level() {
        let mut h = hierarchy(1000);
        h.select_range(Range::new(1, 2));
        h.set_sampler(ByteSampler::from_vec(vec![0; 50], 8));
        assert_eq!(h.level_count(), 1);
        assert_eq!(h.full_range(), Range::new(0, 50));
        assert_eq!(h.selection(), Range::new(0, 50));
    }
}
