// src/store/mod.rs

//! The two on-disk log stores.

pub mod delimited;
pub mod excel_date;
pub mod tabular;
pub mod xlsx_reader;

use std::path::PathBuf;

pub const DEFAULT_TABULAR_STORE: &str = "time_log.xlsx";
pub const DEFAULT_DELIMITED_STORE: &str = "time_log.csv";

/// Where the two stores live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// The `.xlsx` workbook.
    pub tabular: PathBuf,
    /// The `;`-separated text file.
    pub delimited: PathBuf,
}

impl StorePaths {
    pub fn new(tabular: impl Into<PathBuf>, delimited: impl Into<PathBuf>) -> Self {
        Self {
            tabular: tabular.into(),
            delimited: delimited.into(),
        }
    }
}

impl Default for StorePaths {
    fn default() -> Self {
        Self::new(DEFAULT_TABULAR_STORE, DEFAULT_DELIMITED_STORE)
    }
}
