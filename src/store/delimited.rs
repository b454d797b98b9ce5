// src/store/delimited.rs

use crate::core::record::{HEADERS, LogRow};
use crate::errors::{AppError, AppResult};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub const DELIMITER: u8 = b';';

/// First line of the file: tells spreadsheet importers which delimiter to use.
pub const FORMAT_HINT: &str = "sep=;";

/// Create the file with format hint and header. Returns false if it already
/// existed (left untouched, even when it has no header).
pub(crate) fn ensure_exists(path: &Path) -> AppResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    writeln!(file, "{FORMAT_HINT}")?;

    let mut wtr = WriterBuilder::new().delimiter(DELIMITER).from_writer(file);
    wtr.write_record(HEADERS)?;
    sync(wtr)?;

    Ok(true)
}

/// Append one line to the file.
pub(crate) fn append(path: &Path, row: &LogRow) -> AppResult<()> {
    ensure_exists(path)?;

    let file = OpenOptions::new().append(true).open(path)?;
    let mut wtr = WriterBuilder::new().delimiter(DELIMITER).from_writer(file);
    wtr.write_record(row.fields())?;
    sync(wtr)
}

/// Logged rows, in file order. Format hint and header lines are skipped.
pub fn read_rows(path: &Path) -> AppResult<Vec<LogRow>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        if is_preamble(&record) {
            continue;
        }
        let fields: Vec<&str> = record.iter().collect();
        let row = LogRow::from_fields(&fields)
            .ok_or_else(|| AppError::malformed(path, format!("unreadable line {}", idx + 1)))?;
        rows.push(row);
    }

    Ok(rows)
}

fn is_preamble(record: &StringRecord) -> bool {
    // `sep=;` splits on its own delimiter: ["sep=", ""]
    let hint = record.iter().collect::<Vec<_>>().join(";") == FORMAT_HINT;
    let header = record.iter().eq(HEADERS.iter().copied());
    hint || header || record.iter().all(|f| f.is_empty())
}

// Flush the csv buffer and push the bytes to disk before returning.
fn sync(wtr: csv::Writer<File>) -> AppResult<()> {
    let file = wtr.into_inner().map_err(|e| io::Error::other(e.to_string()))?;
    file.sync_all()?;
    Ok(())
}
