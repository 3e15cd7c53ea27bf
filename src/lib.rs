//! Rangescope - multi-resolution minimaps for navigating large binary files.
//!
//! A file is shown as a cascade of minimaps, coarsest first. Selecting a
//! window in one minimap zooms the next one onto it, and the finest
//! selection drives the hex view. This library provides:
//! - The minimap hierarchy and its range partitioning, ladder and scroll
//!   algorithms
//! - Samplers mapping minimap slots to file offsets
//! - The host panel tying the hierarchy to a hex view

pub mod config;
pub mod error;
pub mod minimap;
pub mod panel;
pub mod sampler;
pub mod util;

pub use config::HierarchyConfig;
pub use error::{Error, Result};
pub use minimap::{Level, MinimapColor, MinimapHierarchy, MinimapMode, Range, SelectionChanged};
pub use panel::{HexView, MinimapPanel};
pub use sampler::{ByteSampler, RangeSampler};
