//! Panel owning a minimap hierarchy and the hex view it navigates.

use eframe::egui::Color32;
use tracing::{debug, warn};

use super::HexView;
use crate::config::HierarchyConfig;
use crate::minimap::{MinimapHierarchy, MinimapMode, Range};
use crate::sampler::{ByteSampler, RangeSampler};
use crate::util::color::slot_color;
use crate::util::hex_dump;

/// Host of a [`MinimapHierarchy`].
///
/// Validates range requests before handing them to the hierarchy, and keeps
/// the hex view scrolled to the finest selection. Scrolling the hex view
/// directly realigns the minimaps in turn.
#[derive(Debug)]
pub struct MinimapPanel<S> {
    sampler: S,
    hierarchy: MinimapHierarchy<S>,
    hex_view: HexView,
}

impl<S: RangeSampler> MinimapPanel<S> {
    pub fn new(sampler: S, config: HierarchyConfig) -> Self {
        let hierarchy = MinimapHierarchy::new(sampler.clone(), config);
        Self {
            sampler,
            hierarchy,
            hex_view: HexView::new(),
        }
    }

    /// Point the panel at a new byte source.
    pub fn set_sampler(&mut self, sampler: S) {
        self.hierarchy.set_sampler(sampler.clone());
        self.hierarchy.take_events();
        self.sampler = sampler;
        self.hex_view.reset();
    }

    pub fn hierarchy(&self) -> &MinimapHierarchy<S> {
        &self.hierarchy
    }

    pub fn hex_view(&self) -> &HexView {
        &self.hex_view
    }

    pub fn config(&self) -> &HierarchyConfig {
        self.hierarchy.config()
    }

    /// Final minimap selection.
    pub fn selection(&self) -> Range {
        self.hierarchy.selection()
    }

    pub fn file_size(&self) -> u64 {
        self.hierarchy.full_range().end
    }

    /// Whether a select-range request would be honored.
    pub fn can_select_range(&self) -> bool {
        !self.sampler.is_empty()
    }

    pub fn can_remove_level(&self) -> bool {
        self.hierarchy.can_remove()
    }

    /// Lowest and highest addresses a range request may use.
    pub fn address_bounds(&self) -> Option<Range> {
        if self.sampler.is_empty() {
            return None;
        }
        Some(Range::new(
            self.sampler.file_offset(0),
            self.sampler.file_offset(self.sampler.sample_size()),
        ))
    }

    /// Zoom the minimaps onto `start..end`.
    ///
    /// The endpoints are ordered and clamped into [`address_bounds`](Self::address_bounds).
    /// Returns `false` when the panel has no data.
    pub fn request_select_range(&mut self, start: u64, end: u64) -> bool {
        let Some(bounds) = self.address_bounds() else {
            warn!(start, end, "select range ignored: sampler is empty");
            return false;
        };
        let target = Range::new(start, end).clamp_to(bounds);
        debug!(%target, "select range requested");
        self.hierarchy.select_range(target);
        self.process_events();
        true
    }

    /// Zoom ladder using the configured defaults.
    pub fn request_ladder(&mut self) {
        let config = *self.hierarchy.config();
        self.create_ladder(config.ladder_selection_size, config.ladder_grow_factor);
    }

    pub fn create_ladder(&mut self, selection_size: u64, grow_factor: f64) {
        self.hierarchy.create_ladder(selection_size, grow_factor);
        self.process_events();
    }

    pub fn add_level(&mut self) {
        self.hierarchy.add_level();
    }

    pub fn remove_level(&mut self) -> bool {
        let removed = self.hierarchy.remove_level();
        self.process_events();
        removed
    }

    pub fn toggle_mode(&mut self) -> MinimapMode {
        self.hierarchy.toggle_mode();
        self.hierarchy.mode()
    }

    /// User dragged a selection on minimap `index`.
    pub fn user_select(&mut self, index: usize, range: Range) {
        self.hierarchy.user_select(index, range);
        self.process_events();
    }

    /// User scrolled the hex view so that `offset` is at the top.
    pub fn scroll_hex(&mut self, offset: u64) {
        let file_size = self.file_size();
        self.hex_view.scroll_top(offset, file_size);
        self.hierarchy.scroll_to(self.hex_view.scroll_offset());
    }

    fn process_events(&mut self) {
        let file_size = self.file_size();
        for event in self.hierarchy.take_events() {
            debug!(selection = %event.range, "minimap selection changed");
            self.hex_view.scroll_to(event.range.start, file_size);
        }
    }
}

impl MinimapPanel<ByteSampler> {
    /// Slot colors for minimap `index` in its current tint.
    pub fn slot_colors(&self, index: usize) -> Option<Vec<Color32>> {
        let level = self.hierarchy.level(index)?;
        let color = level.color();
        Some(
            level
                .sampler()
                .samples()
                .into_iter()
                .map(|value| slot_color(color, value))
                .collect(),
        )
    }

    /// Hex dump of the rows the hex view currently shows.
    pub fn visible_dump(&self) -> String {
        let visible = self.hex_view.visible_range(self.file_size());
        let mut sampler = self.sampler.clone();
        sampler.set_range(visible);
        hex_dump(sampler.bytes(), visible.start)
    }
}
