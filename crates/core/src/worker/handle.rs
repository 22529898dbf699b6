//! Handles the UI keeps on a running worker.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::events::WorkerEvent;
use super::types::{SessionSummary, WorkerState};

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Worker task failed: {0}")]
    TaskFailed(String),
}

/// Requests cancellation of a worker. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub(crate) fn new(tx: watch::Sender<bool>) -> Self {
        Self { tx: Arc::new(tx) }
    }

    /// Asks the worker to stop. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Owner-side view of a running worker.
#[derive(Debug)]
pub struct WorkerHandle {
    events: mpsc::Receiver<WorkerEvent>,
    state: watch::Receiver<WorkerState>,
    cancel: CancelHandle,
    task: JoinHandle<SessionSummary>,
}

impl WorkerHandle {
    pub(crate) fn new(
        events: mpsc::Receiver<WorkerEvent>,
        state: watch::Receiver<WorkerState>,
        cancel: CancelHandle,
        task: JoinHandle<SessionSummary>,
    ) -> Self {
        Self {
            events,
            state,
            cancel,
            task,
        }
    }

    /// Next event, or `None` once the worker has stopped and all events
    /// were drained.
    pub async fn next_event(&mut self) -> Option<WorkerEvent> {
        self.events.recv().await
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A detached cancel handle, e.g. for a Ctrl-C listener.
    pub fn canceller(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Current worker state.
    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    /// Receiver for observing state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<WorkerState> {
        self.state.clone()
    }

    /// Waits for the worker to finish and returns its summary.
    ///
    /// Undelivered events are discarded; a pending decision counts as keep.
    pub async fn wait(self) -> Result<SessionSummary, WorkerError> {
        drop(self.events);
        self.task
            .await
            .map_err(|e| WorkerError::TaskFailed(e.to_string()))
    }
}
