//! Unified application error type.
//! All modules (core, store, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Log stores
    // ---------------------------
    #[error("Malformed log store '{path}': {reason}")]
    MalformedStore { path: String, reason: String },

    #[error("Logging failed: {0}")]
    Log(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,
}

impl AppError {
    pub fn malformed(path: &std::path::Path, reason: impl Into<String>) -> Self {
        AppError::MalformedStore {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Io(io::Error::from(e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
