//! PEtab column names.

/// Observable identifier column.
pub const OBSERVABLE_ID: &str = "observableId";
/// Simulation condition column.
pub const SIMULATION_CONDITION_ID: &str = "simulationConditionId";
/// Pre-equilibration condition column.
pub const PREEQUILIBRATION_CONDITION_ID: &str = "preequilibrationConditionId";
/// Time column.
pub const TIME: &str = "time";
/// Measured value column.
pub const MEASUREMENT: &str = "measurement";
/// Simulated value column.
pub const SIMULATION: &str = "simulation";
/// Noise parameter column.
pub const NOISE_PARAMETERS: &str = "noiseParameters";
/// Dataset identifier column.
pub const DATASET_ID: &str = "datasetId";
/// Replicate identifier column.
pub const REPLICATE_ID: &str = "replicateId";
