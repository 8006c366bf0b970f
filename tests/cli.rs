use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn petabvis() -> Command {
    Command::cargo_bin("petabvis").unwrap()
}

fn table(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn help_prints_usage() {
    petabvis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--measurement"))
        .stdout(predicate::str::contains("--group-by"));
}

#[test]
fn missing_measurement_file_fails_before_tui() {
    petabvis()
        .args(["-m", "/definitely/not/here.tsv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to open file"));
}

#[test]
fn malformed_measurement_table_fails() {
    let m = table("observableId\tsimulationConditionId\ttime\tmeasurement\nobs\tc1\tabc\t1.0\n");
    petabvis()
        .arg("-m")
        .arg(m.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'abc' is not a number"));
}

#[test]
fn unmatched_simulation_rows_fail_by_default() {
    let m = table("observableId\tsimulationConditionId\ttime\tmeasurement\nobs\tc1\t0\t1.0\n");
    let s = table("observableId\tsimulationConditionId\ttime\tsimulation\nobs\tc3\t0\t1.0\n");
    petabvis()
        .arg("-m")
        .arg(m.path())
        .arg("-s")
        .arg(s.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'c3'"));
}

#[test]
fn simulation_requires_measurement() {
    petabvis()
        .args(["-s", "simulations.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--measurement"));
}

#[test]
fn unknown_group_by_is_rejected() {
    petabvis()
        .args(["--group-by", "replicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
