// src/store/tabular.rs

use crate::core::record::{Breakdown, HEADERS, LogRow};
use crate::errors::{AppError, AppResult};
use crate::store::excel_date::{
    DATE_NUM_FORMAT, date_to_excel_serial, excel_serial_to_date, parse_text_date,
};
use crate::store::xlsx_reader::{CellValue, read_first_sheet};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook, Worksheet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

const FONT_NAME: &str = "Arial";
const FONT_SIZE: f64 = 8.0;

const TIME_HEADER_FILL: u32 = 0xFFA500; // orange
const HEADER_FILL: u32 = 0xA9A9A9; // dark grey

const DESCRIPTION_COL: usize = 0;
const DATE_COL: usize = 1;
const TIME_SPENT_COL: usize = 3;

const COLUMN_PADDING: f64 = 2.0;
const MIN_DATE_WIDTH: f64 = 12.0;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Formats shared by every write of the sheet.
struct SheetStyles {
    header: Format,
    header_time: Format,
    cell: Format,
    description: Format,
    date: Format,
}

impl SheetStyles {
    fn new() -> Self {
        let font = || Format::new().set_font_name(FONT_NAME).set_font_size(FONT_SIZE);
        let header = |fill: u32| {
            font()
                .set_bold()
                .set_background_color(Color::RGB(fill))
                .set_pattern(FormatPattern::Solid)
        };
        let centered = || {
            font()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
        };

        Self {
            header: header(HEADER_FILL),
            header_time: header(TIME_HEADER_FILL),
            cell: centered(),
            description: font().set_text_wrap(),
            date: centered().set_num_format(DATE_NUM_FORMAT),
        }
    }

    fn for_header(&self, name: &str) -> &Format {
        if matches!(name, "Hours" | "Minutes" | "Seconds") {
            &self.header_time
        } else {
            &self.header
        }
    }
}

/// Create the workbook with its styled header row. Returns false if it
/// already existed (left untouched).
pub(crate) fn ensure_exists(path: &Path) -> AppResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_workbook(path, &[])?;
    Ok(true)
}

/// Append one row. The whole workbook is read back and rewritten: the
/// format has no incremental append.
pub(crate) fn append(path: &Path, row: &LogRow) -> AppResult<()> {
    let mut rows = if path.exists() {
        read_rows(path)?
    } else {
        Vec::new()
    };
    rows.push(row.clone());
    write_workbook(path, &rows)
}

/// Data rows of an existing workbook (header validated and skipped).
pub fn read_rows(path: &Path) -> AppResult<Vec<LogRow>> {
    let sheet = read_first_sheet(path)?;

    let mut lines = sheet.iter().enumerate();
    let header: Vec<String> = match lines.next() {
        Some((_, cells)) => cells.iter().map(CellValue::as_text).collect(),
        None => return Err(AppError::malformed(path, "empty worksheet")),
    };
    if header.len() < HEADERS.len() || header[..HEADERS.len()] != HEADERS {
        return Err(AppError::malformed(
            path,
            format!("unexpected header row {header:?}"),
        ));
    }

    let mut rows = Vec::new();
    for (idx, cells) in lines {
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        let row = row_from_cells(cells)
            .ok_or_else(|| AppError::malformed(path, format!("unreadable row {}", idx + 1)))?;
        rows.push(row);
    }

    Ok(rows)
}

fn row_from_cells(cells: &[CellValue]) -> Option<LogRow> {
    let cell = move |i: usize| cells.get(i).unwrap_or(&EMPTY_CELL);
    let whole = |i: usize| {
        cell(i)
            .as_number()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n as u64)
    };

    let date = match cell(DATE_COL) {
        CellValue::Number(serial) => excel_serial_to_date(*serial)?,
        CellValue::Text(s) => parse_text_date(s)?,
        _ => return None,
    };

    let breakdown = Breakdown {
        hours: whole(4)?,
        minutes: whole(5)?,
        seconds: whole(6)?,
    };
    // Older workbooks hold "Time Spent" as an uncomputed formula.
    let time_spent = match cell(TIME_SPENT_COL) {
        CellValue::Empty => breakdown.decimal_hours(),
        other => other.as_number()?,
    };

    Some(LogRow {
        description: cell(DESCRIPTION_COL).as_text(),
        date,
        week: whole(2)? as u32,
        time_spent,
        hours: breakdown.hours,
        minutes: breakdown.minutes,
        seconds: breakdown.seconds,
    })
}

fn write_workbook(path: &Path, rows: &[LogRow]) -> AppResult<()> {
    let styles = SheetStyles::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // ---------------------------
    // Header
    // ---------------------------
    for (col, name) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, styles.for_header(name))
            .map_err(to_io_app_error)?;
    }

    // ---------------------------
    // Righe + larghezze colonne
    // ---------------------------
    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (idx, row) in rows.iter().enumerate() {
        write_row(worksheet, (idx + 1) as u32, row, &styles)?;

        for (col, value) in row.fields().iter().enumerate() {
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (col, w) in col_widths.iter().enumerate() {
        let mut width = *w as f64 + COLUMN_PADDING;
        if col == DATE_COL {
            width = width.max(MIN_DATE_WIDTH);
        }
        worksheet
            .set_column_width(col as u16, width)
            .map_err(to_io_app_error)?;
    }

    // Save next to the store, then swap it in: a crash mid-save leaves the
    // previous workbook intact.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(path);
    workbook.save(&tmp).map_err(to_io_app_error)?;
    fs::rename(&tmp, path)?;

    Ok(())
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    r: &LogRow,
    styles: &SheetStyles,
) -> AppResult<()> {
    worksheet
        .write_string_with_format(row, 0, &r.description, &styles.description)
        .map_err(to_io_app_error)?;
    worksheet
        .write_number_with_format(row, 1, date_to_excel_serial(r.date), &styles.date)
        .map_err(to_io_app_error)?;

    let numbers = [
        r.week as f64,
        r.time_spent,
        r.hours as f64,
        r.minutes as f64,
        r.seconds as f64,
    ];
    for (offset, value) in numbers.iter().enumerate() {
        worksheet
            .write_number_with_format(row, (offset + 2) as u16, *value, &styles.cell)
            .map_err(to_io_app_error)?;
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(e.to_string()))
}
