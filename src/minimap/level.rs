//! A single tier of the minimap hierarchy.

use crate::minimap::Range;
use crate::sampler::RangeSampler;

/// What the minimap paints for each slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MinimapMode {
    /// Raw byte values.
    #[default]
    Value,
    /// Local entropy.
    Entropy,
}

impl MinimapMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Value => Self::Entropy,
            Self::Entropy => Self::Value,
        }
    }

    /// Color scheme paired with this mode.
    pub fn color(self) -> MinimapColor {
        match self {
            Self::Value => MinimapColor::Green,
            Self::Entropy => MinimapColor::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Entropy => "entropy",
        }
    }
}

/// Base tint a minimap is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MinimapColor {
    #[default]
    Green,
    Red,
    Blue,
}

/// One minimap: a sampler clone, the range it shows and the range highlighted
/// inside it.
///
/// The selected range always lies inside the view range.
#[derive(Clone, Debug)]
pub struct Level<S> {
    sampler: S,
    view: Range,
    selected: Range,
    color: MinimapColor,
    mode: MinimapMode,
    needs_refresh: bool,
}

impl<S: RangeSampler> Level<S> {
    /// Bind a new level to `sampler`, showing and selecting its whole range.
    pub fn new(sampler: S, mode: MinimapMode) -> Self {
        let view = sampler.range();
        Self {
            sampler,
            view,
            selected: view,
            color: mode.color(),
            mode,
            needs_refresh: true,
        }
    }

    /// Replace the sampler; view and selection reset to its range.
    pub fn set_sampler(&mut self, sampler: S) {
        self.view = sampler.range();
        self.selected = self.view;
        self.sampler = sampler;
        self.needs_refresh = true;
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Range of offsets shown.
    #[inline]
    pub fn range(&self) -> Range {
        self.view
    }

    /// Highlighted range inside the view.
    #[inline]
    pub fn selected_range(&self) -> Range {
        self.selected
    }

    /// Retarget the view to `range`.
    ///
    /// With `reset_selection` the whole new view becomes selected; otherwise
    /// the selection keeps its relative position and proportion.
    pub fn set_range(&mut self, range: Range, reset_selection: bool) {
        let old_view = self.view;
        self.sampler.set_range(range);
        self.view = self.sampler.range();
        self.selected = if reset_selection {
            self.view
        } else {
            self.selected.rescale(old_view, self.view)
        };
        self.needs_refresh = true;
    }

    /// Highlight `range`, cut down to the view.
    pub fn set_selected_range(&mut self, range: Range) {
        self.selected = range.clamp_to(self.view);
        self.needs_refresh = true;
    }

    pub fn color(&self) -> MinimapColor {
        self.color
    }

    pub fn set_color(&mut self, color: MinimapColor) {
        self.color = color;
        self.needs_refresh = true;
    }

    pub fn mode(&self) -> MinimapMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MinimapMode) {
        self.mode = mode;
        self.needs_refresh = true;
    }

    /// Mark the level for repainting.
    pub fn refresh(&mut self) {
        self.needs_refresh = true;
    }

    /// Whether the level changed since the renderer last painted it.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Clear the repaint flag after painting.
    pub fn mark_painted(&mut self) {
        self.needs_refresh = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::ByteSampler;

    fn level(len: usize) -> Level<ByteSampler> {
        Level::new(ByteSampler::from_vec(vec![0; len], 64), MinimapMode::Value)
    }

    #[test]
    fn test_new_level_selects_everything() {
        let l = level(1000);
        assert_eq!(l.range(), Range::new(0, 1000));
        assert_eq!(l.selected_range(), Range::new(0, 1000));
        assert_eq!(l.color(), MinimapColor::Green);
    }

    #[test]
    fn test_set_range_keeps_selection_proportions() {
        let mut l = level(1000);
        l.set_selected_range(Range::new(0, 500));
        l.set_range(Range::new(200, 400), false);
        assert_eq!(l.range(), Range::new(200, 400));
        assert_eq!(l.selected_range(), Range::new(200, 300));
        assert_eq!(l.sampler().range(), Range::new(200, 400));
    }

    #[test]
    fn test_set_range_with_reset() {
        let mut l = level(1000);
        l.set_selected_range(Range::new(10, 20));
        l.set_range(Range::new(100, 300), true);
        assert_eq!(l.selected_range(), Range::new(100, 300));
    }

    #[test]
    fn test_selection_clamped_to_view() {
        let mut l = level(1000);
        l.set_range(Range::new(100, 200), true);
        l.set_selected_range(Range::new(50, 150));
        assert_eq!(l.selected_range(), Range::new(100, 150));
    }

    #[test]
    fn test_refresh_flag() {
        let mut l = level(10);
        l.mark_painted();
        assert!(!l.needs_refresh());
        l.set_mode(MinimapMode::Entropy);
        assert!(l.needs_refresh());
    }

    #[test]
    fn test_mode_toggle_and_color() {
        assert_eq!(MinimapMode::Value.toggled(), MinimapMode::Entropy);
        assert_eq!(MinimapMode::Entropy.color(), MinimapColor::Red);
    }
}
