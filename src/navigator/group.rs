//! Plot groups: the rows rendered together as one page.

use crate::data::{columns, MeasurementRow, RowKey, SimulationRow};
use crate::error::{PetabVisError, Result};
use std::collections::HashMap;

/// Simulated means keyed by row key and the simulation's `datasetId`.
type SimulationMeans<'a> = HashMap<(RowKey, Option<&'a str>), f64>;

/// Field used to split rows into plot pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GroupBy {
    /// One page per simulation condition.
    #[default]
    Condition,
    /// One page per observable.
    Observable,
    /// One page per `datasetId`.
    Dataset,
}

impl GroupBy {
    /// Get the next grouping in cycle.
    pub fn next(self) -> Self {
        match self {
            GroupBy::Condition => GroupBy::Observable,
            GroupBy::Observable => GroupBy::Dataset,
            GroupBy::Dataset => GroupBy::Condition,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            GroupBy::Condition => "condition",
            GroupBy::Observable => "observable",
            GroupBy::Dataset => "dataset",
        }
    }

    /// Plot key of a measurement row.
    pub fn plot_key(self, row: &MeasurementRow) -> Option<&str> {
        match self {
            GroupBy::Condition => Some(&row.condition_id),
            GroupBy::Observable => Some(&row.observable_id),
            GroupBy::Dataset => row.dataset_id.as_deref(),
        }
    }

    /// Key splitting a page into lines. Pages keyed by observable are
    /// split by condition, all others by observable.
    pub fn line_key(self, row: &MeasurementRow) -> &str {
        match self {
            GroupBy::Observable => &row.condition_id,
            GroupBy::Condition | GroupBy::Dataset => &row.observable_id,
        }
    }
}

/// What to do with simulation rows that have no matching measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Fail the load with a data format error.
    #[default]
    Reject,
    /// Drop the row and record a warning.
    Drop,
}

/// One point of a line: a measurement and its simulated counterpart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Time.
    pub x: f64,
    /// Measured value.
    pub measured: f64,
    /// Mean simulated value at the same condition, observable and time.
    pub simulated: Option<f64>,
    /// Numeric noise parameter, if provided.
    pub noise: Option<f64>,
}

/// All points of one line within a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableSeries {
    /// Line label (observable, or condition on observable pages).
    pub label: String,
    /// Points in input order.
    pub points: Vec<SeriesPoint>,
}

/// Rows rendered together as one navigable plot page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotGroup {
    /// Value of the grouping key.
    pub plot_id: String,
    /// How this group was keyed.
    pub group_by: GroupBy,
    /// Measurement rows in input order.
    pub measurements: Vec<MeasurementRow>,
    /// Matched simulation rows in input order.
    pub simulations: Vec<SimulationRow>,
}

impl PlotGroup {
    fn new(plot_id: String, group_by: GroupBy) -> Self {
        Self {
            plot_id,
            group_by,
            measurements: Vec::new(),
            simulations: Vec::new(),
        }
    }

    /// Page title.
    pub fn title(&self) -> String {
        format!("{} {}", self.group_by.name(), self.plot_id)
    }

    /// Number of measurement rows.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether the group has no measurement rows.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Whether any simulation rows were matched into this group.
    pub fn has_simulations(&self) -> bool {
        !self.simulations.is_empty()
    }

    /// Lines of this page in first-appearance order.
    pub fn series(&self) -> Vec<ObservableSeries> {
        let sims = self.simulation_means();
        let mut series: Vec<ObservableSeries> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for row in &self.measurements {
            let label = self.group_by.line_key(row);
            let idx = *index.entry(label).or_insert_with(|| {
                series.push(ObservableSeries {
                    label: label.to_string(),
                    points: Vec::new(),
                });
                series.len() - 1
            });

            series[idx].points.push(SeriesPoint {
                x: row.time,
                measured: row.measurement,
                simulated: simulated_value(&sims, row),
                noise: row.noise.as_ref().and_then(|n| n.value()),
            });
        }

        series
    }

    /// (measured, simulated) pairs for every measurement with a simulation.
    pub fn correlation_pairs(&self) -> Vec<(f64, f64)> {
        self.series()
            .iter()
            .flat_map(|s| s.points.iter())
            .filter_map(|p| p.simulated.map(|sim| (p.measured, sim)))
            .collect()
    }

    /// Measurement rows paired with their mean simulated value.
    pub fn rows_with_simulation(&self) -> Vec<(&MeasurementRow, Option<f64>)> {
        let sims = self.simulation_means();
        self.measurements
            .iter()
            .map(|row| (row, simulated_value(&sims, row)))
            .collect()
    }

    /// Render the group as a tab-separated measurement table with an extra
    /// `simulation` column. Cells holding tabs or quotes are quoted, so the
    /// output reads back through [`crate::data::TableReader`].
    pub fn to_tsv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(Vec::new());

        writer
            .write_record([
                columns::OBSERVABLE_ID,
                columns::PREEQUILIBRATION_CONDITION_ID,
                columns::SIMULATION_CONDITION_ID,
                columns::TIME,
                columns::MEASUREMENT,
                columns::SIMULATION,
                columns::NOISE_PARAMETERS,
                columns::DATASET_ID,
                columns::REPLICATE_ID,
            ])
            .map_err(export_error)?;

        for (row, sim) in self.rows_with_simulation() {
            let text = |v: &Option<String>| v.clone().unwrap_or_default();
            writer
                .write_record([
                    row.observable_id.clone(),
                    text(&row.preequilibration_condition_id),
                    row.condition_id.clone(),
                    row.time.to_string(),
                    row.measurement.to_string(),
                    sim.map(|v| v.to_string()).unwrap_or_default(),
                    row.noise.as_ref().map(|n| n.to_string()).unwrap_or_default(),
                    text(&row.dataset_id),
                    text(&row.replicate_id),
                ])
                .map_err(export_error)?;
        }

        let bytes = writer.into_inner().map_err(|e| PetabVisError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| PetabVisError::data_format(format!("export: {}", e)))
    }

    fn simulation_means(&self) -> SimulationMeans<'_> {
        let mut sums: HashMap<(RowKey, Option<&str>), (f64, usize)> = HashMap::new();
        for sim in &self.simulations {
            let entry = sums
                .entry((sim.key(), sim.dataset_id.as_deref()))
                .or_insert((0.0, 0));
            entry.0 += sim.simulation;
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(key, (sum, n))| (key, sum / n as f64))
            .collect()
    }
}

/// Mean of the simulations for `row`: those carrying its `datasetId`, or
/// failing that those without one.
fn simulated_value(means: &SimulationMeans<'_>, row: &MeasurementRow) -> Option<f64> {
    let key = row.key();
    row.dataset_id
        .as_deref()
        .and_then(|ds| means.get(&(key.clone(), Some(ds))))
        .or_else(|| means.get(&(key, None)))
        .copied()
}

fn export_error(err: csv::Error) -> PetabVisError {
    PetabVisError::data_format(format!("export: {}", err))
}

/// Groups built from one load, plus the warnings raised while building them.
#[derive(Debug)]
pub(crate) struct Grouping {
    pub(crate) groups: Vec<PlotGroup>,
    pub(crate) dropped: usize,
    pub(crate) warnings: Vec<String>,
}

/// Split rows into plot groups ordered by first appearance of their key.
pub(crate) fn build_groups(
    measurements: &[MeasurementRow],
    simulations: &[SimulationRow],
    group_by: GroupBy,
    unmatched: UnmatchedPolicy,
) -> Result<Grouping> {
    let mut groups: Vec<PlotGroup> = Vec::new();
    let mut by_plot_id: HashMap<&str, usize> = HashMap::new();
    // every (group, datasetId) holding a measurement at this key
    let mut by_row_key: HashMap<RowKey, Vec<(usize, Option<&str>)>> = HashMap::new();

    for (i, row) in measurements.iter().enumerate() {
        let plot_id = group_by.plot_key(row).ok_or_else(|| {
            PetabVisError::data_format(format!(
                "measurement row {} has no {} to group by",
                i + 1,
                group_by.name()
            ))
        })?;

        let idx = *by_plot_id.entry(plot_id).or_insert_with(|| {
            groups.push(PlotGroup::new(plot_id.to_string(), group_by));
            groups.len() - 1
        });
        groups[idx].measurements.push(row.clone());
        let candidates = by_row_key.entry(row.key()).or_default();
        let candidate = (idx, row.dataset_id.as_deref());
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    let mut dropped = 0;
    let mut warnings = Vec::new();
    for (i, sim) in simulations.iter().enumerate() {
        // a simulation without datasetId pairs with the first measurement
        // at its key, one with a datasetId only with that dataset
        let target = by_row_key.get(&sim.key()).and_then(|candidates| {
            candidates
                .iter()
                .find(|(_, ds)| sim.dataset_id.is_none() || *ds == sim.dataset_id.as_deref())
                .map(|&(idx, _)| idx)
        });
        match target {
            Some(idx) => groups[idx].simulations.push(sim.clone()),
            None => {
                let mut message = format!(
                    "simulation row {} (condition '{}', observable '{}', time {}",
                    i + 1,
                    sim.condition_id,
                    sim.observable_id,
                    sim.time
                );
                if let Some(pre) = &sim.preequilibration_condition_id {
                    message.push_str(&format!(", preequilibration '{}'", pre));
                }
                if let Some(ds) = &sim.dataset_id {
                    message.push_str(&format!(", dataset '{}'", ds));
                }
                message.push_str(") has no matching measurement");
                match unmatched {
                    UnmatchedPolicy::Reject => return Err(PetabVisError::data_format(message)),
                    UnmatchedPolicy::Drop => {
                        tracing::warn!("Dropping {}", message);
                        dropped += 1;
                        warnings.push(format!("Dropped unmatched {}", message));
                    },
                }
            },
        }
    }

    Ok(Grouping {
        groups,
        dropped,
        warnings,
    })
}
