use std::sync::Arc;

use tokio::sync::mpsc;

use super::{ReportError, ReportHandle, SessionRecord, SessionReporter};

/// Background task that receives session records and hands them to a reporter
pub struct ReportWriter {
    rx: mpsc::Receiver<SessionRecord>,
    reporter: Arc<dyn SessionReporter>,
}

impl ReportWriter {
    /// Create a new report writer
    pub fn new(rx: mpsc::Receiver<SessionRecord>, reporter: Arc<dyn SessionReporter>) -> Self {
        Self { rx, reporter }
    }

    /// Run the writer, consuming records until every handle is dropped
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) {
        tracing::debug!("Report writer started");

        while let Some(record) = self.rx.recv().await {
            if let Err(e) = self.dispatch(&record) {
                tracing::error!("Failed to write {} record: {}", record.record_type(), e);
            }
        }

        tracing::debug!("Report writer shutting down");
    }

    fn dispatch(&self, record: &SessionRecord) -> Result<(), ReportError> {
        match record {
            SessionRecord::Converted {
                source,
                output,
                kept,
            } => self.reporter.record_success(source, output, *kept),
            SessionRecord::Skipped { source, reason } => self.reporter.record_skip(source, reason),
            SessionRecord::Failed { source, message } => {
                self.reporter.record_error(source, message)
            }
            SessionRecord::OriginalDeleted { source } => self.reporter.record_deleted(source),
            SessionRecord::Summary { summary } => self.reporter.record_summary(summary),
        }
    }
}

/// Create a complete report system
///
/// Returns:
/// - `ReportHandle` - for emitting records (clone this to share across tasks)
/// - `ReportWriter` - spawn this as a background task with `tokio::spawn(writer.run())`
///
/// The writer exits once every handle has been dropped, after draining what
/// was already queued.
pub fn create_report_system(
    reporter: Arc<dyn SessionReporter>,
    buffer_size: usize,
) -> (ReportHandle, ReportWriter) {
    let (tx, rx) = mpsc::channel(buffer_size.max(1));
    let handle = ReportHandle::new(tx);
    let writer = ReportWriter::new(rx, reporter);
    (handle, writer)
}
