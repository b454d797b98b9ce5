use crate::errors::AppResult;
use crate::store::StorePaths;
use crate::ui::messages::{success, warning};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// What a clear removed, and what was already missing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub removed: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

pub struct ClearLogic;

impl ClearLogic {
    /// Delete both stores. A missing store only warns; any other failure
    /// stops and is returned with the underlying message.
    pub fn clear(paths: &StorePaths) -> AppResult<ClearReport> {
        let mut report = ClearReport::default();

        for path in [&paths.tabular, &paths.delimited] {
            match fs::remove_file(path) {
                Ok(()) => {
                    success(format!("Removed {}", path.display()));
                    report.removed.push(path.clone());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warning(format!("Log file not found: {}", path.display()));
                    report.missing.push(path.clone());
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(report)
    }
}
