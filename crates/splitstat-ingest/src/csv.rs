//! CSV session log reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use splitstat_core::{RecordTable, SessionRecord};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::schema::REQUIRED_COLUMNS;

/// Read a session log from any CSV source.
///
/// The header row must contain every column in [`REQUIRED_COLUMNS`]; column
/// order does not matter and unknown columns are skipped. Metric columns are
/// parsed as floats with surrounding whitespace trimmed. Row numbers in
/// errors are 1-based and count data rows only, the header excluded.
#[instrument(skip(reader))]
pub fn read_csv<R: Read>(reader: R) -> Result<RecordTable> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    let indices = column_indices(&headers)?;

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        records.push(parse_record(&record, &indices, row + 1)?);
    }

    let log = RecordTable::from_records(records);
    log.validate_metrics()?;

    debug!(rows = log.len(), "CSV ingest complete");
    Ok(log)
}

/// Read a session log from a CSV file on disk.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<RecordTable> {
    let file = File::open(path)?;
    read_csv(file)
}

/// Map each required column to its position in the header row.
fn column_indices(headers: &csv::StringRecord) -> Result<[usize; 6]> {
    let mut indices = [0usize; 6];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| Error::MissingColumn {
                column: column.to_string(),
            })?;
    }
    Ok(indices)
}

fn parse_record(
    record: &csv::StringRecord,
    indices: &[usize; 6],
    row: usize,
) -> Result<SessionRecord> {
    let text = |slot: usize| record.get(indices[slot]).unwrap_or("");

    Ok(SessionRecord::new(
        text(0),
        text(1),
        text(2),
        parse_metric(record, indices[3], REQUIRED_COLUMNS[3], row)?,
        parse_metric(record, indices[4], REQUIRED_COLUMNS[4], row)?,
        parse_metric(record, indices[5], REQUIRED_COLUMNS[5], row)?,
    ))
}

fn parse_metric(record: &csv::StringRecord, index: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(index).unwrap_or("");
    raw.trim().parse::<f64>().map_err(|_| Error::InvalidValue {
        column: column.to_string(),
        row,
        value: raw.to_string(),
    })
}
