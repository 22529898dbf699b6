use tokio::sync::mpsc;

use super::SessionRecord;

/// Handle for emitting session records
///
/// This is cheaply cloneable and can be shared across tasks.
/// Records are sent through an async channel to be written by the ReportWriter.
#[derive(Debug, Clone)]
pub struct ReportHandle {
    tx: mpsc::Sender<SessionRecord>,
}

impl ReportHandle {
    /// Create a new report handle from a channel sender
    pub fn new(tx: mpsc::Sender<SessionRecord>) -> Self {
        Self { tx }
    }

    /// Emit a record asynchronously
    ///
    /// Waits for channel capacity. If the channel is closed, the error is
    /// logged but the caller is not failed.
    pub async fn emit(&self, record: SessionRecord) {
        if let Err(e) = self.tx.send(record).await {
            tracing::error!("Failed to emit session record: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn skipped(name: &str) -> SessionRecord {
        SessionRecord::Skipped {
            source: PathBuf::from(name),
            reason: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_emit_record() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = ReportHandle::new(tx);

        handle.emit(skipped("a.docx")).await;

        let record = rx.recv().await.expect("Should receive record");
        assert!(matches!(record, SessionRecord::Skipped { .. }));
    }

    #[tokio::test]
    async fn test_emit_closed_channel() {
        let (tx, rx) = mpsc::channel::<SessionRecord>(10);
        let handle = ReportHandle::new(tx);
        drop(rx);

        // Logged, not propagated
        handle.emit(skipped("a.docx")).await;
    }
}
