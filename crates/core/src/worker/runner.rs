//! The conversion worker loop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::converter::ConverterSet;
use crate::media::Extension;
use crate::registry::ConversionRegistry;
use crate::report::{ReportHandle, SessionRecord};
use crate::staging::StagedFile;

use super::events::{DecisionRequest, WorkerEvent};
use super::handle::{CancelHandle, WorkerHandle};
use super::types::{ConversionOutcome, Decision, SessionSummary, SkipReason, WorkerState};

/// Default capacity of the worker event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 32;

/// Converts a staged list one file at a time on a background task.
///
/// For every file the worker resolves a route, runs the converter and, on
/// success, pauses until the UI answers a keep/delete [`DecisionRequest`].
pub struct ConversionWorker {
    registry: Arc<ConversionRegistry>,
    converters: Arc<ConverterSet>,
    report: Option<ReportHandle>,
    event_buffer: usize,
}

impl ConversionWorker {
    pub fn new(registry: Arc<ConversionRegistry>, converters: Arc<ConverterSet>) -> Self {
        Self {
            registry,
            converters,
            report: None,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }

    /// Sends every outcome and the final summary to a session reporter.
    pub fn with_report(mut self, report: ReportHandle) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_event_buffer(mut self, event_buffer: usize) -> Self {
        self.event_buffer = event_buffer.max(1);
        self
    }

    /// Spawns the worker on the current tokio runtime.
    pub fn start(self, files: Vec<StagedFile>, target_format: impl Into<Extension>) -> WorkerHandle {
        let (event_tx, event_rx) = mpsc::channel(self.event_buffer);
        let (state_tx, state_rx) = watch::channel(WorkerState::Idle);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let session = Session {
            registry: self.registry,
            converters: self.converters,
            report: self.report,
            events: event_tx,
            state: state_tx,
            cancel: cancel_rx,
        };
        let task = tokio::spawn(session.run(files, target_format.into()));

        WorkerHandle::new(event_rx, state_rx, CancelHandle::new(cancel_tx), task)
    }
}

/// Per-item result plus whether the session must stop after it.
struct Step {
    outcome: ConversionOutcome,
    stop: bool,
}

impl Step {
    fn next(outcome: ConversionOutcome) -> Self {
        Self {
            outcome,
            stop: false,
        }
    }

    fn cancelled() -> Self {
        Self {
            outcome: ConversionOutcome::Skipped {
                reason: SkipReason::Cancelled,
            },
            stop: true,
        }
    }
}

struct Session {
    registry: Arc<ConversionRegistry>,
    converters: Arc<ConverterSet>,
    report: Option<ReportHandle>,
    events: mpsc::Sender<WorkerEvent>,
    state: watch::Sender<WorkerState>,
    cancel: watch::Receiver<bool>,
}

impl Session {
    async fn run(mut self, files: Vec<StagedFile>, target_format: Extension) -> SessionSummary {
        info!(
            "Conversion session started: {} file(s) to .{}",
            files.len(),
            target_format
        );
        self.emit(WorkerEvent::Started {
            total: files.len(),
            target_format: target_format.clone(),
        })
        .await;

        let mut summary = SessionSummary::default();

        for (index, file) in files.iter().enumerate() {
            if self.is_cancelled() {
                info!("Cancellation observed before item {}", index);
                summary.cancelled = true;
                break;
            }

            self.set_state(WorkerState::Running { index });
            self.emit(WorkerEvent::ItemStarted {
                index,
                path: file.path.clone(),
            })
            .await;

            let step = self.process(index, file, &target_format).await;
            summary.record(&step.outcome);
            self.report_outcome(&file.path, &step.outcome).await;
            self.emit(WorkerEvent::ItemFinished {
                index,
                path: file.path.clone(),
                outcome: step.outcome,
            })
            .await;

            if step.stop {
                summary.cancelled = true;
                break;
            }
        }

        let final_state = if summary.cancelled {
            WorkerState::Cancelled
        } else {
            WorkerState::Completed
        };
        self.set_state(final_state);

        if let Some(report) = &self.report {
            report.emit(SessionRecord::Summary { summary }).await;
        }
        info!("Conversion session {}: {}", final_state, summary);
        self.emit(WorkerEvent::Finished { summary }).await;

        summary
    }

    async fn process(&mut self, index: usize, file: &StagedFile, target: &Extension) -> Step {
        let route = match self.registry.get_route(file.extension.as_str(), target.as_str()) {
            Ok(route) => route.clone(),
            Err(e) => {
                info!("Skipping {}: {}", file.path.display(), e);
                return Step::next(ConversionOutcome::Skipped {
                    reason: SkipReason::NoRoute {
                        source_format: file.extension.clone(),
                        target_format: target.clone(),
                    },
                });
            }
        };

        let converter = self.converters.get(route.converter);
        debug!(
            "Converting {} with {} ({})",
            file.path.display(),
            converter.name(),
            route.converter
        );

        let output_path = match converter.convert(&file.path, target).await {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "Conversion failed for {}: {}",
                    file.path.display(),
                    e.detailed_message()
                );
                return Step {
                    outcome: ConversionOutcome::Error {
                        message: e.to_string(),
                    },
                    stop: self.is_cancelled(),
                };
            }
        };

        if self.is_cancelled() {
            info!(
                "Cancelled after converting {}; leaving {} in place",
                file.path.display(),
                output_path.display()
            );
            return Step::cancelled();
        }

        if route.lossy {
            self.emit(WorkerEvent::Warning {
                index,
                message: format!(
                    "{}: lossy conversion, quality may be reduced",
                    file.display_name()
                ),
            })
            .await;
        }

        self.set_state(WorkerState::PendingDecision { index });
        let (request, answer) =
            DecisionRequest::new(index, file.path.clone(), output_path.clone());
        self.emit(WorkerEvent::DecisionRequired(request)).await;

        let decision = tokio::select! {
            biased;
            _ = cancellation(&mut self.cancel) => {
                info!("Cancelled while awaiting decision for {}", file.path.display());
                return Step::cancelled();
            }
            answer = answer => answer.unwrap_or_else(|_| {
                debug!("Decision request for item {} dropped, keeping original", index);
                Decision::Keep
            }),
        };

        let outcome = match decision {
            Decision::Keep => ConversionOutcome::Success {
                output_path,
                kept: true,
                note: None,
            },
            Decision::Delete => self.delete_original(&file.path, output_path).await,
        };
        Step::next(outcome)
    }

    async fn delete_original(
        &self,
        source: &Path,
        output_path: PathBuf,
    ) -> ConversionOutcome {
        match tokio::fs::remove_file(source).await {
            Ok(()) => {
                info!("Deleted original {}", source.display());
                if let Some(report) = &self.report {
                    report
                        .emit(SessionRecord::OriginalDeleted {
                            source: source.to_path_buf(),
                        })
                        .await;
                }
                ConversionOutcome::Success {
                    output_path,
                    kept: false,
                    note: None,
                }
            }
            Err(e) => {
                let note = format!("Failed to delete original: {}", e);
                warn!("{}: {}", source.display(), note);
                if let Some(report) = &self.report {
                    report
                        .emit(SessionRecord::Failed {
                            source: source.to_path_buf(),
                            message: note.clone(),
                        })
                        .await;
                }
                ConversionOutcome::Success {
                    output_path,
                    kept: true,
                    note: Some(note),
                }
            }
        }
    }

    async fn report_outcome(&self, source: &Path, outcome: &ConversionOutcome) {
        let Some(report) = &self.report else {
            return;
        };
        let source = source.to_path_buf();
        let record = match outcome {
            ConversionOutcome::Success {
                output_path, kept, ..
            } => SessionRecord::Converted {
                source,
                output: output_path.clone(),
                kept: *kept,
            },
            ConversionOutcome::Skipped { reason } => SessionRecord::Skipped {
                source,
                reason: reason.to_string(),
            },
            ConversionOutcome::Error { message } => SessionRecord::Failed {
                source,
                message: message.clone(),
            },
        };
        report.emit(record).await;
    }

    async fn emit(&self, event: WorkerEvent) {
        if self.events.send(event).await.is_err() {
            debug!("Worker event dropped, receiver closed");
        }
    }

    fn set_state(&self, state: WorkerState) {
        debug!("Worker state -> {}", state);
        self.state.send_replace(state);
    }

    fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

/// Resolves once cancellation is requested. Never resolves if every
/// cancel handle is gone without cancelling.
async fn cancellation(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}
