//! Utility functions shared across the crate.
//!
//! This module provides common utilities for:
//! - Minimap color palette
//! - Size and offset formatting

pub mod color;
pub mod format;

pub use format::{format_bytes, hex_dump, parse_offset};
