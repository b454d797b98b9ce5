// src/store/excel_date.rs

use chrono::{NaiveDate, TimeDelta};

/// Display format applied to date cells.
pub const DATE_NUM_FORMAT: &str = "dd/mm/yyyy";

/// Day zero of the spreadsheet date system (1900 system, leap bug included).
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Date -> spreadsheet serial (whole days since the epoch).
pub fn date_to_excel_serial(date: NaiveDate) -> f64 {
    (date - excel_epoch()).num_days() as f64
}

/// Spreadsheet serial -> date. The time-of-day fraction is ignored.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    excel_epoch().checked_add_signed(TimeDelta::try_days(serial.floor() as i64)?)
}

/// Dates stored as text: ISO first, then the displayed day/month/year form.
pub fn parse_text_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}
