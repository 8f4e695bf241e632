//! Error handling for the dividend report
//!
//! Defines the typed failures a report run can hit and establishes a unified
//! Result type using anyhow for context chaining and error propagation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("missing expected column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }
}

/// Result type alias for report operations
pub type Result<T> = anyhow::Result<T>;
