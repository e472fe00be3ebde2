// src/io/reporting.rs

use std::error::Error;
use std::io::Write;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::simulation::runner::{Summary, TrialRunner};

/// One CSV row: a single trial outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRecord<'a> {
    pub title: &'a str,
    pub trial: usize,
    pub value: Decimal,
}

/// The results of a runner, one record per trial, in call order.
pub fn trial_records(runner: &TrialRunner) -> Vec<TrialRecord<'_>> {
    runner
        .results()
        .iter()
        .enumerate()
        .map(|(trial, &value)| TrialRecord {
            title: runner.title(),
            trial,
            value,
        })
        .collect()
}

/// Serializes records as CSV into any writer, header row included.
pub fn write_csv<W: Write, S: Serialize>(writer: W, data: &[S]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in data {
        wtr.serialize(record)?;
    }

    // Dropping the writer would swallow I/O errors.
    wtr.flush()?;
    Ok(())
}

/// Writes the trial results of every runner to a CSV file.
///
/// Columns are `title,trial,value`. Failed runners contribute the trials
/// they completed before aborting.
pub fn write_trial_log(file_path: &Path, runners: &[TrialRunner]) -> Result<(), Box<dyn Error>> {
    let records: Vec<TrialRecord<'_>> = runners.iter().flat_map(trial_records).collect();
    write_csv(std::fs::File::create(file_path)?, &records)?;

    info!(
        rows = records.len(),
        path = %file_path.display(),
        "Successfully exported trial results"
    );
    Ok(())
}

/// Writes one summary row per run to a CSV file.
pub fn write_summaries(file_path: &Path, summaries: &[Summary]) -> Result<(), Box<dyn Error>> {
    write_csv(std::fs::File::create(file_path)?, summaries)?;

    info!(
        rows = summaries.len(),
        path = %file_path.display(),
        "Successfully exported run summaries"
    );
    Ok(())
}
