//! Log records and their canonical projection into the seven logged fields.
//!
//! Both stores serialize the same `LogRow`; only the encoding differs
//! (styled cells vs. a `;`-joined line).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Column names, in store order.
pub const HEADERS: [&str; 7] = [
    "Description",
    "Date",
    "Week",
    "Time Spent",
    "Hours",
    "Minutes",
    "Seconds",
];

/// Date layout used in the delimited store and in JSON output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole hours/minutes/seconds of an elapsed time. Fractions are truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    pub fn from_seconds(elapsed: f64) -> Self {
        let total = clamp_elapsed(elapsed).floor() as u64;
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    /// Decimal hours as logged under "Time Spent": `hours + minutes / 60`.
    pub fn decimal_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0
    }
}

/// One completed session, as logged.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub description: String,
    /// Day the session was logged (not the day it started).
    pub date: NaiveDate,
    pub elapsed_seconds: f64,
}

impl LogRecord {
    pub fn new(description: impl Into<String>, date: NaiveDate, elapsed_seconds: f64) -> Self {
        Self {
            description: description.into(),
            date,
            elapsed_seconds: clamp_elapsed(elapsed_seconds),
        }
    }

    pub fn iso_week(&self) -> u32 {
        self.date.iso_week().week()
    }

    pub fn breakdown(&self) -> Breakdown {
        Breakdown::from_seconds(self.elapsed_seconds)
    }

    pub fn to_row(&self) -> LogRow {
        let b = self.breakdown();
        LogRow {
            description: self.description.clone(),
            date: self.date,
            week: self.iso_week(),
            time_spent: b.decimal_hours(),
            hours: b.hours,
            minutes: b.minutes,
            seconds: b.seconds,
        }
    }
}

/// A record as it sits in a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRow {
    pub description: String,
    pub date: NaiveDate,
    pub week: u32,
    pub time_spent: f64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl LogRow {
    /// Stringified fields, in `HEADERS` order.
    pub fn fields(&self) -> [String; 7] {
        [
            self.description.clone(),
            self.date.format(DATE_FORMAT).to_string(),
            self.week.to_string(),
            self.time_spent.to_string(),
            self.hours.to_string(),
            self.minutes.to_string(),
            self.seconds.to_string(),
        ]
    }

    /// Parse the stringified fields back. `None` if any field is unreadable.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Option<Self> {
        if fields.len() < HEADERS.len() {
            return None;
        }
        let f = move |i: usize| fields[i].as_ref().trim();

        Some(Self {
            description: fields[0].as_ref().to_string(),
            date: NaiveDate::parse_from_str(f(1), DATE_FORMAT).ok()?,
            week: f(2).parse().ok()?,
            time_spent: f(3).parse().ok()?,
            hours: f(4).parse().ok()?,
            minutes: f(5).parse().ok()?,
            seconds: f(6).parse().ok()?,
        })
    }
}

// NaN and negatives are treated as an empty session.
fn clamp_elapsed(elapsed: f64) -> f64 {
    if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 }
}
