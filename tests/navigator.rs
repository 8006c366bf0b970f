use petabvis::data::{PetabDataset, TableReader};
use petabvis::navigator::{BoundaryPolicy, GroupBy, NavigatorConfig, PlotNavigator, UnmatchedPolicy};
use petabvis::PetabVisError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const MEASUREMENTS: &str = "\
observableId\tpreequilibrationConditionId\tsimulationConditionId\ttime\tmeasurement\tnoiseParameters\tdatasetId
obs_a\t\tc1\t0\t1.0\t0.1\tds1
obs_a\t\tc1\t10\t2.0\t0.1\tds1
obs_b\t\tc2\t0\t3.0\tsigma_b\tds2
obs_a\t\tc2\tinf\t4.0\t\tds2
";

const SIMULATIONS: &str = "\
observableId\tsimulationConditionId\ttime\tsimulation
obs_a\tc1\t0\t1.1
obs_a\tc1\t10\t1.9
obs_b\tc2\t0\t2.8
";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn navigator(group_by: GroupBy) -> PlotNavigator {
    PlotNavigator::new(NavigatorConfig {
        group_by,
        ..NavigatorConfig::default()
    })
}

#[test]
fn loads_tables_from_disk_and_pages_by_condition() {
    let dir = TempDir::new().unwrap();
    let m = write(&dir, "measurements.tsv", MEASUREMENTS);
    let s = write(&dir, "simulations.tsv", SIMULATIONS);
    let dataset = PetabDataset::load(&m, Some(&s)).unwrap();
    assert_eq!(dataset.display_name(), "measurements.tsv + simulations.tsv");

    let mut nav = navigator(GroupBy::Condition);
    let report = nav
        .load(&dataset.measurements, dataset.simulations.as_deref())
        .unwrap();
    assert_eq!(report.group_count, 2);
    assert_eq!(report.measurement_count, 4);
    assert_eq!(report.simulation_count, 3);

    let first = nav.current_group().unwrap();
    assert_eq!(first.plot_id, "c1");
    assert_eq!(first.correlation_pairs(), vec![(1.0, 1.1), (2.0, 1.9)]);

    let second = nav.next().unwrap();
    assert_eq!(second.plot_id, "c2");
    let labels: Vec<String> = second.series().into_iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["obs_b", "obs_a"]);
    assert!(second.series()[1].points[0].x.is_infinite());
}

#[test]
fn every_row_lands_in_exactly_one_group() {
    let rows = TableReader::measurements_from_reader(MEASUREMENTS.as_bytes(), "m.tsv").unwrap();
    for group_by in [GroupBy::Condition, GroupBy::Observable, GroupBy::Dataset] {
        let mut nav = navigator(group_by);
        nav.load(&rows, None).unwrap();
        let total: usize = nav.groups().iter().map(|g| g.len()).sum();
        assert_eq!(total, rows.len(), "grouping by {}", group_by.name());
    }
}

#[test]
fn unknown_simulation_condition_follows_policy() {
    let m = TableReader::measurements_from_reader(MEASUREMENTS.as_bytes(), "m.tsv").unwrap();
    let s = TableReader::simulations_from_reader(
        "observableId\tsimulationConditionId\ttime\tsimulation\nobs_a\tc3\t0\t1.0\n".as_bytes(),
        "s.tsv",
    )
    .unwrap();

    let mut nav = navigator(GroupBy::Condition);
    let err = nav.load(&m, Some(s.as_slice())).unwrap_err();
    assert!(err.is_data_format());

    let mut nav = PlotNavigator::new(NavigatorConfig {
        unmatched: UnmatchedPolicy::Drop,
        ..NavigatorConfig::default()
    });
    let report = nav.load(&m, Some(s.as_slice())).unwrap();
    assert_eq!(report.dropped, 1);
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn malformed_reload_keeps_first_load() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.tsv", MEASUREMENTS);
    let bad = write(
        &dir,
        "bad.tsv",
        "observableId\tsimulationConditionId\ttime\nobs\tc1\t0\n",
    );

    let mut nav = navigator(GroupBy::Condition);
    let dataset = PetabDataset::load(&good, None).unwrap();
    nav.load(&dataset.measurements, None).unwrap();
    nav.go_to(1).unwrap();

    let err = PetabDataset::load(&bad, None).unwrap_err();
    assert!(err.to_string().contains("missing required column 'measurement'"));

    assert!(matches!(nav.load(&[], None), Err(PetabVisError::EmptyDataset)));

    assert_eq!(nav.current_index(), 1);
    assert_eq!(nav.current_group().unwrap().plot_id, "c2");
}

#[test]
fn wrap_policy_cycles_over_loaded_pages() {
    let rows = TableReader::measurements_from_reader(MEASUREMENTS.as_bytes(), "m.tsv").unwrap();
    let mut nav = PlotNavigator::new(NavigatorConfig {
        boundary: BoundaryPolicy::Wrap,
        ..NavigatorConfig::default()
    });
    nav.load(&rows, None).unwrap();
    assert_eq!(nav.previous().unwrap().plot_id, "c2");
    assert_eq!(nav.next().unwrap().plot_id, "c1");
    assert!(matches!(
        nav.go_to(5),
        Err(PetabVisError::OutOfRange { index: 5, count: 2 })
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = PetabDataset::load(std::path::Path::new("/no/such/table.tsv"), None).unwrap_err();
    assert!(matches!(err, PetabVisError::FileOpen { .. }));
    assert!(err.to_string().contains("/no/such/table.tsv"));
}

#[test]
fn datasets_sharing_a_condition_keep_their_own_simulations() {
    let dir = TempDir::new().unwrap();
    let m = write(
        &dir,
        "measurements.tsv",
        "observableId\tsimulationConditionId\ttime\tmeasurement\tdatasetId\n\
         obs\tc1\t0\t1.0\tds1\n\
         obs\tc1\t0\t5.0\tds2\n",
    );
    let s = write(
        &dir,
        "simulations.tsv",
        "observableId\tsimulationConditionId\ttime\tsimulation\tdatasetId\n\
         obs\tc1\t0\t1.1\tds1\n\
         obs\tc1\t0\t5.1\tds2\n",
    );
    let dataset = PetabDataset::load(&m, Some(&s)).unwrap();

    let mut nav = navigator(GroupBy::Dataset);
    nav.load(&dataset.measurements, dataset.simulations.as_deref()).unwrap();
    assert_eq!(nav.current_group().unwrap().correlation_pairs(), vec![(1.0, 1.1)]);

    let ds2 = nav.next().unwrap();
    assert_eq!(ds2.plot_id, "ds2");
    assert_eq!(ds2.simulations.len(), 1);
    assert_eq!(ds2.simulations[0].simulation, 5.1);
    assert_eq!(ds2.correlation_pairs(), vec![(5.0, 5.1)]);
}
