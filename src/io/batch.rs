//! CSV ingest and export for batch runs.
//!
//! Input schema (header required):
//!
//! ```text
//! id,value,x,z
//! sk-67-22,12.0,0.35,0.004
//! ```
//!
//! `value` is a mass (Msun) or a `log10(L/Lsun)` depending on the batch
//! direction. Malformed rows are not fatal: they come back as row errors so the
//! rest of the file is still evaluated.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::pipeline::BatchOutcome;
use crate::calc::Output;
use crate::domain::{Bound, Direction};
use crate::error::AppError;

/// One star from the input CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarRow {
    pub id: String,
    pub value: f64,
    pub x: f64,
    pub z: f64,
}

/// A row that could not be parsed.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number in the file (header is line 1).
    pub line: usize,
    pub message: String,
}

/// Parsed rows plus the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct StarTable {
    pub rows: Vec<StarRow>,
    pub row_errors: Vec<RowError>,
}

/// Read star rows from any reader.
pub fn read_star_rows<R: Read>(reader: R) -> Result<StarTable, AppError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV header: {e}")))?
        .clone();
    for required in ["id", "value", "x", "z"] {
        if !headers.iter().any(|h| h == required) {
            return Err(AppError::new(2, format!("CSV is missing required column '{required}'.")));
        }
    }

    let mut table = StarTable::default();
    for (idx, record) in rdr.deserialize::<StarRow>().enumerate() {
        match record {
            Ok(row) => table.rows.push(row),
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(idx + 2);
                table.row_errors.push(RowError {
                    line,
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(table)
}

/// Open and read a star CSV.
pub fn load_star_rows(path: &Path) -> Result<StarTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_star_rows(file)
}

/// Flat per-star record for CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub id: String,
    pub direction: Direction,
    pub value: f64,
    pub x: f64,
    pub z: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub he: Option<f64>,
    pub slope: Option<f64>,
    pub reliable: Option<bool>,
    /// Warnings joined with `"; "`.
    pub warnings: String,
    pub error: Option<String>,
}

impl BatchRecord {
    pub fn from_outcome(outcome: &BatchOutcome, direction: Direction) -> Self {
        let row = &outcome.row;
        let mut record = BatchRecord {
            id: row.id.clone(),
            direction,
            value: row.value,
            x: row.x,
            z: row.z,
            min: None,
            max: None,
            he: None,
            slope: None,
            reliable: None,
            warnings: String::new(),
            error: None,
        };

        match &outcome.result {
            Ok(output) => {
                for r in output.rows() {
                    match r.bound {
                        Bound::Min => record.min = Some(r.value),
                        Bound::Max => record.max = Some(r.value),
                        Bound::Helium => record.he = Some(r.value),
                    }
                }
                record.slope = match output {
                    Output::Luminosity(out) if record.min.is_some() => Some(out.slope),
                    Output::Mass(out) => out.slope,
                    _ => None,
                };
                record.reliable = Some(output.is_reliable());
                record.warnings = output
                    .warnings()
                    .iter()
                    .map(|w| w.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
            }
            Err(err) => record.error = Some(err.to_string()),
        }
        record
    }
}

/// Write batch records as CSV to any writer.
pub fn write_batch_csv<W: Write>(writer: W, records: &[BatchRecord]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }
    wtr.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write batch records to a CSV file.
pub fn export_batch_csv(path: &Path, records: &[BatchRecord]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_batch_csv(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn reads_rows_and_collects_bad_ones() {
        let data = "id,value,x,z\nA,5.0,0.3,0.008\nB,oops,0.3,0.008\n C , 12 , 0.5 , 0.004 \n";
        let table = read_star_rows(data.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].id, "C");
        assert_eq!(table.rows[1].value, 12.0);
        assert_eq!(table.row_errors.len(), 1);
        assert_eq!(table.row_errors[0].line, 3);
    }

    #[test]
    fn missing_column_is_rejected() {
        let err = read_star_rows("id,value,x\nA,5,0.3\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn failed_rows_export_their_error() {
        let outcome = BatchOutcome {
            row: StarRow {
                id: "far".to_string(),
                value: 9.0,
                x: 0.3,
                z: 0.008,
            },
            result: Err(ModelError::Bracketing {
                branch: crate::domain::Branch::LMin,
                z: 0.008,
            }),
        };
        let record = BatchRecord::from_outcome(&outcome, Direction::Mass);
        assert_eq!(record.min, None);
        assert!(record.error.as_deref().unwrap().contains("failed"));

        let mut buf = Vec::new();
        write_batch_csv(&mut buf, &[record]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,direction,value,x,z,min,max,he,slope,reliable,warnings,error")
        );
        assert!(lines.next().unwrap().starts_with("far,mass,9.0,0.3,0.008,,,,,,,"));
    }
}
