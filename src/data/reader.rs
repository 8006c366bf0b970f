//! PEtab table reader.

use super::columns;
use super::{MeasurementRow, NoiseParameter, SimulationRow};
use crate::error::{PetabVisError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reader for tab-separated PEtab measurement and simulation tables.
#[derive(Debug)]
pub struct TableReader;

impl TableReader {
    /// Read a measurement table from disk.
    pub fn read_measurements(path: &Path) -> Result<Vec<MeasurementRow>> {
        let file = File::open(path).map_err(|e| PetabVisError::file_open(path.to_path_buf(), e))?;
        let rows = Self::measurements_from_reader(BufReader::new(file), &source_name(path))?;
        tracing::info!("Read {} measurement rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Read a simulation table from disk.
    pub fn read_simulations(path: &Path) -> Result<Vec<SimulationRow>> {
        let file = File::open(path).map_err(|e| PetabVisError::file_open(path.to_path_buf(), e))?;
        let rows = Self::simulations_from_reader(BufReader::new(file), &source_name(path))?;
        tracing::info!("Read {} simulation rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Parse a measurement table. `source` names the input in error messages.
    pub fn measurements_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<MeasurementRow>> {
        let rows = Self::parse(reader, source, columns::MEASUREMENT)?
            .into_iter()
            .map(|r| MeasurementRow {
                observable_id: r.observable_id,
                condition_id: r.condition_id,
                preequilibration_condition_id: r.preequilibration_condition_id,
                time: r.time,
                measurement: r.value,
                noise: r.noise,
                dataset_id: r.dataset_id,
                replicate_id: r.replicate_id,
            })
            .collect();
        Ok(rows)
    }

    /// Parse a simulation table. `source` names the input in error messages.
    pub fn simulations_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<SimulationRow>> {
        let rows = Self::parse(reader, source, columns::SIMULATION)?
            .into_iter()
            .map(|r| SimulationRow {
                observable_id: r.observable_id,
                condition_id: r.condition_id,
                preequilibration_condition_id: r.preequilibration_condition_id,
                time: r.time,
                simulation: r.value,
                noise: r.noise,
                dataset_id: r.dataset_id,
                replicate_id: r.replicate_id,
            })
            .collect();
        Ok(rows)
    }

    fn parse<R: Read>(reader: R, source: &str, value_column: &str) -> Result<Vec<RawRow>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| csv_error(source, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let layout = ColumnLayout::from_headers(&headers, value_column, source)?;
        tracing::debug!("{}: columns {:?}", source, headers);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| csv_error(source, e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let cell = |idx: usize| record.get(idx).unwrap_or("");
            let optional = |idx: Option<usize>| {
                idx.map(|i| cell(i))
                    .filter(|v| !v.is_empty())
                    .map(|v| v.to_string())
            };

            let observable_id = required_text(cell(layout.observable), source, line, columns::OBSERVABLE_ID)?;
            let condition_id =
                required_text(cell(layout.condition), source, line, columns::SIMULATION_CONDITION_ID)?;
            let time = parse_number(cell(layout.time), source, line, columns::TIME)?;
            let value = parse_number(cell(layout.value), source, line, value_column)?;

            rows.push(RawRow {
                observable_id,
                condition_id,
                preequilibration_condition_id: optional(layout.preequilibration),
                time,
                value,
                noise: optional(layout.noise).map(|n| NoiseParameter::parse(&n)),
                dataset_id: optional(layout.dataset),
                replicate_id: optional(layout.replicate),
            });
        }

        Ok(rows)
    }
}

/// Column indices resolved from a header row.
#[derive(Debug)]
struct ColumnLayout {
    observable: usize,
    condition: usize,
    time: usize,
    value: usize,
    preequilibration: Option<usize>,
    noise: Option<usize>,
    dataset: Option<usize>,
    replicate: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &[String], value_column: &str, source: &str) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| {
                PetabVisError::data_format(format!("{}: missing required column '{}'", source, name))
            })
        };

        Ok(Self {
            observable: required(columns::OBSERVABLE_ID)?,
            condition: required(columns::SIMULATION_CONDITION_ID)?,
            time: required(columns::TIME)?,
            value: required(value_column)?,
            preequilibration: find(columns::PREEQUILIBRATION_CONDITION_ID),
            noise: find(columns::NOISE_PARAMETERS),
            dataset: find(columns::DATASET_ID),
            replicate: find(columns::REPLICATE_ID),
        })
    }
}

/// Fields shared by measurement and simulation rows.
#[derive(Debug)]
struct RawRow {
    observable_id: String,
    condition_id: String,
    preequilibration_condition_id: Option<String>,
    time: f64,
    value: f64,
    noise: Option<NoiseParameter>,
    dataset_id: Option<String>,
    replicate_id: Option<String>,
}

fn required_text(cell: &str, source: &str, line: u64, column: &str) -> Result<String> {
    if cell.is_empty() {
        return Err(PetabVisError::data_format(format!(
            "{}:{}: empty '{}'",
            source, line, column
        )));
    }
    Ok(cell.to_string())
}

fn parse_number(cell: &str, source: &str, line: u64, column: &str) -> Result<f64> {
    cell.parse::<f64>().map_err(|_| {
        PetabVisError::data_format(format!(
            "{}:{}: '{}' is not a number in column '{}'",
            source, line, cell, column
        ))
    })
}

fn csv_error(source: &str, err: csv::Error) -> PetabVisError {
    if !err.is_io_error() {
        return PetabVisError::data_format(format!("{}: {}", source, err));
    }
    match err.into_kind() {
        csv::ErrorKind::Io(e) => PetabVisError::Io(e),
        other => PetabVisError::data_format(format!("{}: {:?}", source, other)),
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
