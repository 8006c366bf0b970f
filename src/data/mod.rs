//! Data reading and representation.
//!
//! This module handles reading PEtab measurement and simulation tables
//! into typed rows.

pub mod columns;
mod dataset;
mod reader;
mod row;

pub use dataset::PetabDataset;
pub use reader::TableReader;
pub use row::{MeasurementRow, NoiseParameter, RowKey, SimulationRow};
