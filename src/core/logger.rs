//! Session logger: appends a finished session to both log stores.
//!
//! The stores are independent files, so each write is attempted on its own
//! and reported on its own. The logger never touches the timer; resetting it
//! after a successful log is up to the caller.

use crate::core::clock::{Clock, SystemClock};
use crate::core::record::LogRecord;
use crate::errors::{AppError, AppResult};
use crate::store::{StorePaths, delimited, tabular};
use std::path::PathBuf;

pub struct SessionLogger<C: Clock = SystemClock> {
    paths: StorePaths,
    clock: C,
}

impl SessionLogger<SystemClock> {
    pub fn new(paths: StorePaths) -> Self {
        Self::with_clock(paths, SystemClock)
    }
}

impl<C: Clock> SessionLogger<C> {
    pub fn with_clock(paths: StorePaths, clock: C) -> Self {
        Self { paths, clock }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Create whichever store is missing. Returns the paths created.
    pub fn ensure_stores_exist(&self) -> AppResult<Vec<PathBuf>> {
        let mut created = Vec::new();
        if tabular::ensure_exists(&self.paths.tabular)? {
            created.push(self.paths.tabular.clone());
        }
        if delimited::ensure_exists(&self.paths.delimited)? {
            created.push(self.paths.delimited.clone());
        }
        Ok(created)
    }

    /// Log one session, dated today. Both stores are always attempted,
    /// workbook first; there is no rollback if only one succeeds.
    pub fn log_session(&self, description: &str, elapsed_seconds: f64) -> LogReport {
        let today = self.clock.now().date_naive();
        let record = LogRecord::new(description, today, elapsed_seconds);
        let row = record.to_row();

        let tabular = tabular::ensure_exists(&self.paths.tabular)
            .and_then(|_| tabular::append(&self.paths.tabular, &row));
        let delimited = delimited::ensure_exists(&self.paths.delimited)
            .and_then(|_| delimited::append(&self.paths.delimited, &row));

        LogReport {
            record,
            tabular,
            delimited,
        }
    }
}

/// Per-store outcome of `log_session`.
#[derive(Debug)]
pub struct LogReport {
    pub record: LogRecord,
    pub tabular: AppResult<()>,
    pub delimited: AppResult<()>,
}

impl LogReport {
    pub fn is_complete(&self) -> bool {
        self.tabular.is_ok() && self.delimited.is_ok()
    }

    /// The record if both stores were written, otherwise one error naming
    /// every store that failed.
    pub fn into_result(self) -> AppResult<LogRecord> {
        let outcomes = [
            ("tabular store", self.tabular),
            ("delimited store", self.delimited),
        ];
        let failures: Vec<String> = outcomes
            .into_iter()
            .filter_map(|(store, res)| res.err().map(|e| format!("{store}: {e}")))
            .collect();

        if failures.is_empty() {
            Ok(self.record)
        } else {
            Err(AppError::Log(failures.join("; ")))
        }
    }
}
