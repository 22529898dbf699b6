//! Events emitted by a running worker.

use std::path::PathBuf;

use tokio::sync::oneshot;

use crate::media::Extension;

use super::types::{ConversionOutcome, Decision, SessionSummary};

/// Progress notification sent from the worker to the UI.
#[derive(Debug)]
pub enum WorkerEvent {
    /// Processing began.
    Started {
        total: usize,
        target_format: Extension,
    },
    /// The file at `index` is about to be converted.
    ItemStarted { index: usize, path: PathBuf },
    /// Something the user should see before deciding, such as a lossy route.
    Warning { index: usize, message: String },
    /// The worker is paused until the request is answered.
    DecisionRequired(DecisionRequest),
    /// The file at `index` has its final outcome.
    ItemFinished {
        index: usize,
        path: PathBuf,
        outcome: ConversionOutcome,
    },
    /// The session ended. Always the last event.
    Finished { summary: SessionSummary },
}

/// A keep/delete question bound to one converted file.
///
/// Dropping the request without answering is treated as [`Decision::Keep`].
#[derive(Debug)]
pub struct DecisionRequest {
    pub index: usize,
    pub source: PathBuf,
    pub output: PathBuf,
    responder: oneshot::Sender<Decision>,
}

impl DecisionRequest {
    pub(crate) fn new(
        index: usize,
        source: PathBuf,
        output: PathBuf,
    ) -> (Self, oneshot::Receiver<Decision>) {
        let (responder, rx) = oneshot::channel();
        (
            Self {
                index,
                source,
                output,
                responder,
            },
            rx,
        )
    }

    /// Answers the request. Returns false if the worker is no longer waiting.
    pub fn respond(self, decision: Decision) -> bool {
        self.responder.send(decision).is_ok()
    }
}
