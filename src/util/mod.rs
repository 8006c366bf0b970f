//! Utility functions.
//!
//! This module provides helpers for clipboard operations, series colors,
//! layout constants and the warning log.

mod clipboard;
mod colormaps;
pub mod layout_config;
mod warnings;

pub use clipboard::{copy_group, copy_to_clipboard};
pub use colormaps::SeriesPalette;
pub use warnings::WarningLog;
