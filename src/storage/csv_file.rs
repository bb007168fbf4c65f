use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info};

use crate::models::ReportRow;
use crate::storage::{StorageError, TableRow};
use crate::transform::require_columns;

/// Writes rows as CSV. The header is always written, even for an empty batch.
pub fn write_csv<R, W>(writer: W, rows: &[R]) -> Result<(), StorageError>
where
    R: TableRow + Serialize,
    W: Write,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(R::header())?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}

/// Replaces the file at `path` with the given rows, creating parent directories.
pub fn write_csv_file<R>(path: &Path, rows: &[R]) -> Result<(), StorageError>
where
    R: TableRow + Serialize,
{
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_csv(BufWriter::new(file), rows)?;

    info!("Wrote {} row(s) to {}", rows.len(), path.display());

    Ok(())
}

/// Reads report rows, failing before any row is read if a required column is absent.
///
/// Unknown extra columns (an index column, for instance) are ignored. Any row that
/// fails to parse aborts the read.
pub fn read_report<R: Read>(reader: R, required: &[&str]) -> Result<Vec<ReportRow>, StorageError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader);

    require_columns(reader.headers()?, required)?;

    let rows = reader.deserialize::<ReportRow>().collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} report row(s)", rows.len());

    Ok(rows)
}

pub fn read_report_file(path: &Path, required: &[&str]) -> Result<Vec<ReportRow>, StorageError> {
    let file = File::open(path)?;
    read_report(BufReader::new(file), required)
}
