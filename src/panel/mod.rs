//! Host side of the minimap hierarchy.
//!
//! This module contains:
//! - `MinimapPanel` - validates requests and wires selections to the hex view
//! - `HexView` - scroll state of the hex view

mod hex_view;
mod minimap_panel;

pub use hex_view::HexView;
pub use minimap_panel::MinimapPanel;
