// src/store/xlsx_reader.rs

//! Minimal read-back of the first worksheet of an `.xlsx` workbook.
//!
//! rust_xlsxwriter only writes, so appending to an existing workbook needs
//! the old rows first. An `.xlsx` is a zip of XML parts; we only need the
//! workbook/relationship parts to locate the first sheet, the shared string
//! table and the sheet itself.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::LazyLock;
use zip::ZipArchive;
use zip::result::ZipError;

const DEFAULT_SHEET: &str = "xl/worksheets/sheet1.xml";

static SHEET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<sheet\b[^>]*>").expect("valid regex"));
static REL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<Relationship\b[^>]*>").expect("valid regex"));
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w:]+)\s*=\s*"([^"]*)""#).expect("valid regex"));
static SI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<si>(.*?)</si>").expect("valid regex"));
static T_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<t(?:\s[^>]*)?>(.*?)</t>").expect("valid regex"));
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<row\b([^>]*?)(?:/>|>(.*?)</row>)").expect("valid regex")
});
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<c\b([^>]*?)(?:/>|>(.*?)</c>)").expect("valid regex"));
static V_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<v>(.*?)</v>").expect("valid regex"));
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|[a-z]+);").expect("valid regex"));

/// A cell value as found in the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Numeric view of the cell; numeric text counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text view of the cell, as a spreadsheet would show it unformatted.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Rows of the first worksheet, densely indexed from row 1 / column A.
/// Rows shorter than others are not padded.
pub fn read_first_sheet(path: &Path) -> AppResult<Vec<Vec<CellValue>>> {
    let file = File::open(path)?;
    if file.metadata()?.is_dir() {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("'{}' is a directory", path.display()),
        )));
    }
    let mut archive = ZipArchive::new(file).map_err(|e| zip_error(path, "not a workbook", e))?;

    let shared = match read_part(&mut archive, path, "xl/sharedStrings.xml")? {
        Some(xml) => parse_shared_strings(&xml),
        None => Vec::new(),
    };

    let sheet_part = first_sheet_part(&mut archive, path)?;
    let sheet_xml = read_part(&mut archive, path, &sheet_part)?.ok_or_else(|| {
        AppError::malformed(path, format!("missing worksheet part '{sheet_part}'"))
    })?;

    parse_sheet(&sheet_xml, &shared).map_err(|reason| AppError::malformed(path, reason))
}

fn read_part(
    archive: &mut ZipArchive<File>,
    path: &Path,
    name: &str,
) -> AppResult<Option<String>> {
    match archive.by_name(name) {
        Ok(mut part) => {
            let mut xml = String::new();
            part.read_to_string(&mut xml)
                .map_err(|e| AppError::malformed(path, format!("unreadable part '{name}' ({e})")))?;
            Ok(Some(xml))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(zip_error(path, &format!("unreadable part '{name}'"), e)),
    }
}

// Filesystem failures stay I/O errors; anything else means a broken workbook.
fn zip_error(path: &Path, context: &str, e: ZipError) -> AppError {
    match e {
        ZipError::Io(e) => AppError::Io(e),
        other => AppError::malformed(path, format!("{context} ({other})")),
    }
}

/// Locate the first `<sheet>` of the workbook through its relationship id.
fn first_sheet_part(archive: &mut ZipArchive<File>, path: &Path) -> AppResult<String> {
    let Some(workbook) = read_part(archive, path, "xl/workbook.xml")? else {
        return Ok(DEFAULT_SHEET.to_string());
    };
    let Some(rels) = read_part(archive, path, "xl/_rels/workbook.xml.rels")? else {
        return Ok(DEFAULT_SHEET.to_string());
    };

    let rel_id = SHEET_RE
        .find(&workbook)
        .and_then(|m| attribute(m.as_str(), "r:id"))
        .ok_or_else(|| AppError::malformed(path, "workbook has no sheets"))?;

    let target = REL_RE
        .find_iter(&rels)
        .map(|m| m.as_str())
        .find(|tag| attribute(tag, "Id").as_deref() == Some(rel_id.as_str()))
        .and_then(|tag| attribute(tag, "Target"))
        .ok_or_else(|| AppError::malformed(path, format!("no relationship '{rel_id}'")))?;

    Ok(match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    })
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    ATTR_RE
        .captures_iter(tag)
        .find(|c| &c[1] == name)
        .map(|c| unescape(&c[2]))
}

fn parse_shared_strings(xml: &str) -> Vec<String> {
    SI_RE
        .captures_iter(xml)
        .map(|si| concat_text_runs(&si[1]))
        .collect()
}

// Plain `<t>` or rich text made of several `<r><t>` runs.
fn concat_text_runs(fragment: &str) -> String {
    T_RE.captures_iter(fragment)
        .map(|t| unescape(&t[1]))
        .collect()
}

fn parse_sheet(xml: &str, shared: &[String]) -> Result<Vec<Vec<CellValue>>, String> {
    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    for row in ROW_RE.captures_iter(xml) {
        let row_index = match attribute(&row[1], "r") {
            Some(r) => r
                .parse::<usize>()
                .ok()
                .filter(|r| *r > 0)
                .map(|r| r - 1)
                .ok_or_else(|| format!("invalid row number '{r}'"))?,
            None => rows.len(),
        };
        if rows.len() <= row_index {
            rows.resize(row_index + 1, Vec::new());
        }

        let Some(body) = row.get(2) else {
            continue;
        };

        let mut cells: Vec<CellValue> = Vec::new();
        for cell in CELL_RE.captures_iter(body.as_str()) {
            let attrs = &cell[1];
            let col = match attribute(attrs, "r") {
                Some(reference) => column_index(&reference)
                    .ok_or_else(|| format!("invalid cell reference '{reference}'"))?,
                None => cells.len(),
            };
            let inner = cell.get(2).map(|m| m.as_str()).unwrap_or("");
            let value = cell_value(attribute(attrs, "t").as_deref(), inner, shared)?;

            if cells.len() <= col {
                cells.resize(col + 1, CellValue::Empty);
            }
            cells[col] = value;
        }
        rows[row_index] = cells;
    }

    Ok(rows)
}

fn cell_value(kind: Option<&str>, inner: &str, shared: &[String]) -> Result<CellValue, String> {
    let raw = V_RE.captures(inner).map(|v| unescape(&v[1]));

    let value = match (kind, raw) {
        (Some("inlineStr"), _) => CellValue::Text(concat_text_runs(inner)),
        (_, None) => CellValue::Empty,
        // formula saved without a cached result, e.g. `<f>E2+F2/60</f><v></v>`
        (None | Some("n"), Some(v)) if v.trim().is_empty() => CellValue::Empty,
        (Some("s"), Some(v)) => {
            let idx: usize = v
                .trim()
                .parse()
                .map_err(|_| format!("invalid shared string index '{v}'"))?;
            let text = shared
                .get(idx)
                .ok_or_else(|| format!("shared string {idx} out of range"))?;
            CellValue::Text(text.clone())
        }
        (Some("str") | Some("e"), Some(v)) => CellValue::Text(v),
        (Some("b"), Some(v)) => CellValue::Bool(v.trim() == "1"),
        (_, Some(v)) => CellValue::Number(
            v.trim()
                .parse()
                .map_err(|_| format!("invalid number '{v}'"))?,
        ),
    };

    Ok(value)
}

/// "A1" -> 0, "G12" -> 6, "AA3" -> 26.
fn column_index(reference: &str) -> Option<usize> {
    let letters: String = reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let n = letters
        .to_ascii_uppercase()
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + (b - b'A' + 1) as usize);
    Some(n - 1)
}

fn unescape(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(|dec| dec.parse::<u32>()))
                    .and_then(|code| code.ok())
                    .and_then(char::from_u32),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
