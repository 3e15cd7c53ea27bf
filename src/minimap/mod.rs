//! Multi-resolution minimap hierarchy.
//!
//! This module contains:
//! - `Range` - offset spans and window arithmetic
//! - `Level` - one minimap with its own sampler clone
//! - `MinimapHierarchy` - the coordinator that keeps levels nested

mod hierarchy;
mod level;
mod range;

pub use hierarchy::{MinimapHierarchy, SelectionChanged};
pub use level::{Level, MinimapColor, MinimapMode};
pub use range::Range;
