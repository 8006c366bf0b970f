//! Dataset information.

use super::{MeasurementRow, SimulationRow, TableReader};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Measurement and optional simulation tables loaded from disk.
#[derive(Debug, Clone)]
pub struct PetabDataset {
    /// Path to the measurement table.
    pub measurement_path: PathBuf,
    /// Path to the simulation table, if one was given.
    pub simulation_path: Option<PathBuf>,
    /// Measurement rows in file order.
    pub measurements: Vec<MeasurementRow>,
    /// Simulation rows in file order.
    pub simulations: Option<Vec<SimulationRow>>,
}

impl PetabDataset {
    /// Read both tables. Either failure aborts the whole load.
    pub fn load(measurement_path: &Path, simulation_path: Option<&Path>) -> Result<Self> {
        let measurements = TableReader::read_measurements(measurement_path)?;
        let simulations = simulation_path
            .map(TableReader::read_simulations)
            .transpose()?;

        Ok(Self {
            measurement_path: measurement_path.to_path_buf(),
            simulation_path: simulation_path.map(Path::to_path_buf),
            measurements,
            simulations,
        })
    }

    /// File name of the measurement table, for titles.
    pub fn display_name(&self) -> String {
        let name = |p: &Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.display().to_string())
        };
        match &self.simulation_path {
            Some(sim) => format!("{} + {}", name(&self.measurement_path), name(sim)),
            None => name(&self.measurement_path),
        }
    }
}
