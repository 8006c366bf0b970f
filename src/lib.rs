//! petabvis - A terminal-based viewer for PEtab measurement and simulation tables.
//!
//! Measurement rows are split into plot pages (one per simulation condition by
//! default) and paired with simulated values. A [`navigator::PlotNavigator`]
//! keeps a bounded cursor into the pages, and the TUI renders the current one.
//!
//! # Features
//!
//! - Tab-separated PEtab table reading with line-accurate errors
//! - Grouping by condition, observable or dataset id
//! - Series, mean ± SD, mean ± SEM, correlation and table views
//! - Vim-style keyboard shortcuts
//! - Gruvbox color themes
//! - Clipboard integration
//!
//! # Example
//!
//! ```ignore
//! use petabvis::data::PetabDataset;
//! use petabvis::navigator::{NavigatorConfig, PlotNavigator};
//! use std::path::Path;
//!
//! let dataset = PetabDataset::load(Path::new("measurements.tsv"), None)?;
//! let mut navigator = PlotNavigator::new(NavigatorConfig::default());
//! navigator.load(&dataset.measurements, None)?;
//! println!("First page: {}", navigator.current_group()?.title());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod data;
pub mod error;
pub mod file_browser;
pub mod navigator;
pub mod ui;
pub mod util;

pub use error::{PetabVisError, Result};
