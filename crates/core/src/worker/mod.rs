//! Background conversion worker.
//!
//! The worker consumes a staged list strictly in order, one conversion at a
//! time, on its own tokio task. The UI drives it through a [`WorkerHandle`]:
//!
//! - [`WorkerHandle::next_event`] yields [`WorkerEvent`]s (progress, warnings,
//!   decision requests and the final summary)
//! - every successful conversion pauses the worker on a [`DecisionRequest`]
//!   until the user answers keep or delete
//! - [`WorkerHandle::cancel`] stops the session; a partial
//!   [`SessionSummary`] is still produced
//!
//! # Example
//!
//! ```ignore
//! let worker = ConversionWorker::new(registry, converters).with_report(report);
//! let mut handle = worker.start(staging.into_files(), "jpg");
//!
//! while let Some(event) = handle.next_event().await {
//!     match event {
//!         WorkerEvent::DecisionRequired(request) => {
//!             request.respond(Decision::Keep);
//!         }
//!         WorkerEvent::Finished { summary } => println!("{}", summary),
//!         _ => {}
//!     }
//! }
//! ```

mod events;
mod handle;
mod runner;
mod types;

pub use events::{DecisionRequest, WorkerEvent};
pub use handle::{CancelHandle, WorkerError, WorkerHandle};
pub use runner::{ConversionWorker, DEFAULT_EVENT_BUFFER};
pub use types::{ConversionOutcome, Decision, SessionSummary, SkipReason, WorkerState};
