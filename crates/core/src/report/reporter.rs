use std::path::Path;

use thiserror::Error;

use crate::worker::SessionSummary;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to open session log {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write session log: {0}")]
    Write(#[from] std::io::Error),
}

/// Sink for session outcomes.
///
/// Write-only and append-only. Implementations are called from the report
/// writer task, one record at a time, in emission order.
pub trait SessionReporter: Send + Sync {
    fn record_success(&self, source: &Path, output: &Path, kept: bool)
        -> Result<(), ReportError>;

    fn record_skip(&self, source: &Path, reason: &str) -> Result<(), ReportError>;

    fn record_error(&self, source: &Path, message: &str) -> Result<(), ReportError>;

    fn record_deleted(&self, source: &Path) -> Result<(), ReportError>;

    fn record_summary(&self, summary: &SessionSummary) -> Result<(), ReportError>;
}
