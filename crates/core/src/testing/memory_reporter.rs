//! In-memory session reporter for testing.

use std::path::Path;
use std::sync::Mutex;

use crate::report::{ReportError, SessionRecord, SessionReporter};
use crate::worker::SessionSummary;

/// Reporter that keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<SessionRecord>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<SessionRecord> {
        self.lock().clone()
    }

    /// The summary record, if the session has finished.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.lock().iter().find_map(|r| match r {
            SessionRecord::Summary { summary } => Some(*summary),
            _ => None,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SessionRecord>> {
        self.records.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn push(&self, record: SessionRecord) -> Result<(), ReportError> {
        self.lock().push(record);
        Ok(())
    }
}

impl SessionReporter for MemoryReporter {
    fn record_success(
        &self,
        source: &Path,
        output: &Path,
        kept: bool,
    ) -> Result<(), ReportError> {
        self.push(SessionRecord::Converted {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            kept,
        })
    }

    fn record_skip(&self, source: &Path, reason: &str) -> Result<(), ReportError> {
        self.push(SessionRecord::Skipped {
            source: source.to_path_buf(),
            reason: reason.to_string(),
        })
    }

    fn record_error(&self, source: &Path, message: &str) -> Result<(), ReportError> {
        self.push(SessionRecord::Failed {
            source: source.to_path_buf(),
            message: message.to_string(),
        })
    }

    fn record_deleted(&self, source: &Path) -> Result<(), ReportError> {
        self.push(SessionRecord::OriginalDeleted {
            source: source.to_path_buf(),
        })
    }

    fn record_summary(&self, summary: &SessionSummary) -> Result<(), ReportError> {
        self.push(SessionRecord::Summary { summary: *summary })
    }
}
