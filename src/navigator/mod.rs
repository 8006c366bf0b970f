//! Plot navigation.
//!
//! The navigator groups measurement and simulation rows into an ordered
//! list of [`PlotGroup`]s and keeps a bounded cursor into that list. The
//! rendering layer asks for the current group after every navigation call.

mod group;
mod search;
pub mod stats;

pub use group::{GroupBy, ObservableSeries, PlotGroup, SeriesPoint, UnmatchedPolicy};
pub use search::SearchState;

use crate::data::{MeasurementRow, SimulationRow};
use crate::error::{PetabVisError, Result};

/// Behavior of `next`/`previous` at the ends of the group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Stay on the first/last group.
    #[default]
    Clamp,
    /// Wrap around to the other end.
    Wrap,
}

/// Navigator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigatorConfig {
    /// Field used to split rows into pages.
    pub group_by: GroupBy,
    /// Behavior at the ends of the group list.
    pub boundary: BoundaryPolicy,
    /// Handling of simulation rows without a matching measurement.
    pub unmatched: UnmatchedPolicy,
}

/// Summary of a successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Number of plot groups built.
    pub group_count: usize,
    /// Number of measurement rows loaded.
    pub measurement_count: usize,
    /// Number of simulation rows matched into groups.
    pub simulation_count: usize,
    /// Number of unmatched simulation rows dropped.
    pub dropped: usize,
    /// Non-fatal problems found while loading.
    pub warnings: Vec<String>,
}

/// Ordered plot groups with a cursor.
#[derive(Debug, Default)]
pub struct PlotNavigator {
    config: NavigatorConfig,
    groups: Vec<PlotGroup>,
    cursor: usize,
}

impl PlotNavigator {
    /// Create an empty navigator.
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            config,
            groups: Vec::new(),
            cursor: 0,
        }
    }

    /// Replace the loaded groups with ones built from `measurements` and
    /// optional `simulations`.
    ///
    /// On error the previously loaded groups and cursor are kept.
    pub fn load(
        &mut self,
        measurements: &[MeasurementRow],
        simulations: Option<&[SimulationRow]>,
    ) -> Result<LoadReport> {
        if measurements.is_empty() {
            return Err(PetabVisError::EmptyDataset);
        }

        let simulations = simulations.unwrap_or(&[]);
        let grouping = group::build_groups(
            measurements,
            simulations,
            self.config.group_by,
            self.config.unmatched,
        )?;

        let report = LoadReport {
            group_count: grouping.groups.len(),
            measurement_count: measurements.len(),
            simulation_count: simulations.len() - grouping.dropped,
            dropped: grouping.dropped,
            warnings: grouping.warnings,
        };

        self.groups = grouping.groups;
        self.cursor = 0;
        tracing::info!(
            "Loaded {} plot groups by {} ({} measurements, {} simulations)",
            report.group_count,
            self.config.group_by.name(),
            report.measurement_count,
            report.simulation_count
        );

        Ok(report)
    }

    /// Group under the cursor.
    pub fn current_group(&self) -> Result<&PlotGroup> {
        self.groups.get(self.cursor).ok_or(PetabVisError::EmptyDataset)
    }

    /// Move to the next group. At the last group this is a no-op under
    /// [`BoundaryPolicy::Clamp`] and wraps to the first under [`BoundaryPolicy::Wrap`].
    pub fn next(&mut self) -> Result<&PlotGroup> {
        let count = self.non_empty_count()?;
        if self.cursor + 1 < count {
            self.cursor += 1;
        } else if self.config.boundary == BoundaryPolicy::Wrap {
            self.cursor = 0;
        }
        self.current_group()
    }

    /// Move to the previous group, with the same boundary rules as [`next`](Self::next).
    pub fn previous(&mut self) -> Result<&PlotGroup> {
        let count = self.non_empty_count()?;
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.config.boundary == BoundaryPolicy::Wrap {
            self.cursor = count - 1;
        }
        self.current_group()
    }

    /// Jump to `index`.
    pub fn go_to(&mut self, index: usize) -> Result<&PlotGroup> {
        if index >= self.groups.len() {
            return Err(PetabVisError::out_of_range(index, self.groups.len()));
        }
        self.cursor = index;
        self.current_group()
    }

    /// Go to the first group.
    pub fn go_to_first(&mut self) -> Result<&PlotGroup> {
        self.go_to(0)
    }

    /// Go to the last group.
    pub fn go_to_last(&mut self) -> Result<&PlotGroup> {
        let count = self.non_empty_count()?;
        self.go_to(count - 1)
    }

    /// Index of the group with the given plot id.
    pub fn find(&self, plot_id: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.plot_id == plot_id)
    }

    /// Total number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups are loaded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Current cursor position.
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// All groups in page order.
    pub fn groups(&self) -> &[PlotGroup] {
        &self.groups
    }

    /// Active configuration.
    pub fn config(&self) -> NavigatorConfig {
        self.config
    }

    /// Change the configuration. Takes effect on the next [`load`](Self::load).
    pub fn set_config(&mut self, config: NavigatorConfig) {
        self.config = config;
    }

    fn non_empty_count(&self) -> Result<usize> {
        match self.groups.len() {
            0 => Err(PetabVisError::EmptyDataset),
            n => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(conditions: &[&str]) -> Vec<MeasurementRow> {
        conditions
            .iter()
            .enumerate()
            .map(|(i, c)| MeasurementRow::new(c, "obs", i as f64, i as f64 * 2.0))
            .collect()
    }

    fn loaded(conditions: &[&str], boundary: BoundaryPolicy) -> PlotNavigator {
        let mut nav = PlotNavigator::new(NavigatorConfig {
            boundary,
            ..NavigatorConfig::default()
        });
        nav.load(&rows(conditions), None).unwrap();
        nav
    }

    #[test]
    fn groups_conditions_in_order() {
        let nav = loaded(&["c1", "c1", "c2"], BoundaryPolicy::Clamp);
        assert_eq!(nav.group_count(), 2);
        assert_eq!(nav.groups()[0].len(), 2);
        assert_eq!(nav.groups()[1].len(), 1);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn empty_navigator_reports_empty_dataset() {
        let mut nav = PlotNavigator::default();
        assert!(matches!(nav.current_group(), Err(PetabVisError::EmptyDataset)));
        assert!(matches!(nav.next(), Err(PetabVisError::EmptyDataset)));
        assert!(matches!(nav.previous(), Err(PetabVisError::EmptyDataset)));
        assert!(matches!(nav.load(&[], None), Err(PetabVisError::EmptyDataset)));
    }

    #[test]
    fn clamp_policy_stops_at_both_ends() {
        let mut nav = loaded(&["a", "b", "c"], BoundaryPolicy::Clamp);
        assert_eq!(nav.previous().unwrap().plot_id, "a");
        assert_eq!(nav.current_index(), 0);

        nav.go_to(2).unwrap();
        assert_eq!(nav.next().unwrap().plot_id, "c");
        assert_eq!(nav.next().unwrap().plot_id, "c");
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn wrap_policy_cycles() {
        let mut nav = loaded(&["a", "b"], BoundaryPolicy::Wrap);
        assert_eq!(nav.previous().unwrap().plot_id, "b");
        assert_eq!(nav.next().unwrap().plot_id, "a");
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut nav = loaded(&["a", "b"], BoundaryPolicy::Clamp);
        nav.go_to(1).unwrap();
        let err = nav.go_to(2).unwrap_err();
        assert!(matches!(err, PetabVisError::OutOfRange { index: 2, count: 2 }));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn go_to_is_idempotent() {
        let mut nav = loaded(&["a", "b", "c"], BoundaryPolicy::Clamp);
        let first = nav.go_to(1).unwrap().clone();
        let second = nav.go_to(1).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(nav.current_group().unwrap(), &first);
    }

    #[test]
    fn first_last_and_find() {
        let mut nav = loaded(&["a", "b", "c"], BoundaryPolicy::Clamp);
        assert_eq!(nav.go_to_last().unwrap().plot_id, "c");
        assert_eq!(nav.go_to_first().unwrap().plot_id, "a");
        assert_eq!(nav.find("b"), Some(1));
        assert_eq!(nav.find("zzz"), None);
    }

    #[test]
    fn failed_reload_keeps_previous_groups() {
        let mut nav = loaded(&["a", "b"], BoundaryPolicy::Clamp);
        nav.next().unwrap();

        let bad_sim = vec![SimulationRow::new("c3", "obs", 0.0, 1.0)];
        assert!(nav.load(&rows(&["x"]), Some(bad_sim.as_slice())).is_err());

        assert_eq!(nav.group_count(), 2);
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.current_group().unwrap().plot_id, "b");
    }

    #[test]
    fn successful_reload_resets_cursor() {
        let mut nav = loaded(&["a", "b"], BoundaryPolicy::Clamp);
        nav.next().unwrap();
        nav.load(&rows(&["x", "y", "z"]), None).unwrap();
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.group_count(), 3);
    }

    #[test]
    fn drop_policy_reports_dropped_rows() {
        let mut nav = PlotNavigator::new(NavigatorConfig {
            unmatched: UnmatchedPolicy::Drop,
            ..NavigatorConfig::default()
        });
        let sims = vec![
            SimulationRow::new("c1", "obs", 0.0, 0.5),
            SimulationRow::new("c3", "obs", 0.0, 1.0),
        ];
        let report = nav.load(&rows(&["c1"]), Some(sims.as_slice())).unwrap();
        assert_eq!(report.simulation_count, 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(nav.current_group().unwrap().simulations.len(), 1);
    }
}
