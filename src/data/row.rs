//! Typed rows of PEtab measurement and simulation tables.

use std::fmt;

/// Content of a `noiseParameters` cell.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseParameter {
    /// Numeric noise, usable directly as an error bar.
    Value(f64),
    /// Name of an estimated parameter (or a `;`-separated list).
    Parameter(String),
}

impl NoiseParameter {
    /// Parse a non-empty cell.
    pub fn parse(cell: &str) -> Self {
        match cell.parse::<f64>() {
            Ok(v) => Self::Value(v),
            Err(_) => Self::Parameter(cell.to_string()),
        }
    }

    /// Numeric value, if the cell held a number.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Parameter(_) => None,
        }
    }
}

impl fmt::Display for NoiseParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Parameter(p) => write!(f, "{}", p),
        }
    }
}

/// Key correlating simulation rows with measurement rows.
///
/// Time is compared bitwise after folding `-0.0` into `0.0`, so `inf`
/// (steady state) matches itself. `datasetId` is not part of the key; it
/// is matched separately because simulation tables may leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    /// Simulation condition identifier.
    pub condition_id: String,
    /// Pre-equilibration condition identifier.
    pub preequilibration_condition_id: Option<String>,
    /// Observable identifier.
    pub observable_id: String,
    time_bits: u64,
}

impl RowKey {
    /// Build a key without a pre-equilibration condition.
    pub fn new(condition_id: &str, observable_id: &str, time: f64) -> Self {
        let time = if time == 0.0 { 0.0 } else { time };
        Self {
            condition_id: condition_id.to_string(),
            preequilibration_condition_id: None,
            observable_id: observable_id.to_string(),
            time_bits: time.to_bits(),
        }
    }

    /// Set the pre-equilibration condition.
    pub fn with_preequilibration(mut self, condition_id: Option<&str>) -> Self {
        self.preequilibration_condition_id = condition_id.map(str::to_string);
        self
    }

    /// Time component.
    pub fn time(&self) -> f64 {
        f64::from_bits(self.time_bits)
    }
}

/// One observation from a measurement table.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// Observable identifier.
    pub observable_id: String,
    /// Simulation condition identifier.
    pub condition_id: String,
    /// Optional pre-equilibration condition.
    pub preequilibration_condition_id: Option<String>,
    /// Time point; `inf` denotes steady state.
    pub time: f64,
    /// Measured value.
    pub measurement: f64,
    /// Optional noise parameter.
    pub noise: Option<NoiseParameter>,
    /// Optional dataset identifier.
    pub dataset_id: Option<String>,
    /// Optional replicate identifier.
    pub replicate_id: Option<String>,
}

impl MeasurementRow {
    /// Create a row with the mandatory fields only.
    pub fn new(condition_id: &str, observable_id: &str, time: f64, measurement: f64) -> Self {
        Self {
            observable_id: observable_id.to_string(),
            condition_id: condition_id.to_string(),
            preequilibration_condition_id: None,
            time,
            measurement,
            noise: None,
            dataset_id: None,
            replicate_id: None,
        }
    }

    /// Correlation key of this row.
    pub fn key(&self) -> RowKey {
        RowKey::new(&self.condition_id, &self.observable_id, self.time)
            .with_preequilibration(self.preequilibration_condition_id.as_deref())
    }
}

/// One simulated value from a simulation table.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRow {
    /// Observable identifier.
    pub observable_id: String,
    /// Simulation condition identifier.
    pub condition_id: String,
    /// Optional pre-equilibration condition.
    pub preequilibration_condition_id: Option<String>,
    /// Time point; `inf` denotes steady state.
    pub time: f64,
    /// Simulated value.
    pub simulation: f64,
    /// Optional noise parameter.
    pub noise: Option<NoiseParameter>,
    /// Optional dataset identifier.
    pub dataset_id: Option<String>,
    /// Optional replicate identifier.
    pub replicate_id: Option<String>,
}

impl SimulationRow {
    /// Create a row with the mandatory fields only.
    pub fn new(condition_id: &str, observable_id: &str, time: f64, simulation: f64) -> Self {
        Self {
            observable_id: observable_id.to_string(),
            condition_id: condition_id.to_string(),
            preequilibration_condition_id: None,
            time,
            simulation,
            noise: None,
            dataset_id: None,
            replicate_id: None,
        }
    }

    /// Correlation key of this row.
    pub fn key(&self) -> RowKey {
        RowKey::new(&self.condition_id, &self.observable_id, self.time)
            .with_preequilibration(self.preequilibration_condition_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_parses_numbers_and_names() {
        assert_eq!(NoiseParameter::parse("0.5").value(), Some(0.5));
        assert_eq!(
            NoiseParameter::parse("sigma_obs1"),
            NoiseParameter::Parameter("sigma_obs1".to_string())
        );
    }

    #[test]
    fn keys_match_across_row_kinds() {
        let m = MeasurementRow::new("c1", "obs", 2.5, 1.0);
        let s = SimulationRow::new("c1", "obs", 2.5, 1.1);
        assert_eq!(m.key(), s.key());
        assert_ne!(m.key(), RowKey::new("c1", "obs", 3.0));
    }

    #[test]
    fn preequilibration_condition_separates_keys() {
        let mut m = MeasurementRow::new("c1", "obs", 0.0, 1.0);
        m.preequilibration_condition_id = Some("pre1".to_string());
        let mut s = SimulationRow::new("c1", "obs", 0.0, 1.1);
        assert_ne!(m.key(), s.key());

        s.preequilibration_condition_id = Some("pre1".to_string());
        assert_eq!(m.key(), s.key());
    }

    #[test]
    fn key_folds_negative_zero_and_keeps_infinity() {
        assert_eq!(RowKey::new("c", "o", -0.0), RowKey::new("c", "o", 0.0));
        assert_eq!(
            RowKey::new("c", "o", f64::INFINITY),
            RowKey::new("c", "o", "inf".parse().unwrap())
        );
        assert!(RowKey::new("c", "o", f64::INFINITY).time().is_infinite());
    }
}
