//! Session reporting.
//!
//! The worker never touches the log file directly. It emits
//! [`SessionRecord`]s through a [`ReportHandle`]; a [`ReportWriter`] task
//! drains them in order into a [`SessionReporter`], normally a
//! [`FileSessionReporter`].

mod events;
mod file;
mod handle;
mod reporter;
mod writer;

pub use events::SessionRecord;
pub use file::{log_file_name, FileSessionReporter};
pub use handle::ReportHandle;
pub use reporter::{ReportError, SessionReporter};
pub use writer::{create_report_system, ReportWriter};
