//! Types describing worker progress and per-file results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::media::Extension;

/// Observable state of a conversion worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkerState {
    /// Created but not yet processing.
    Idle,
    /// Converting the file at `index`.
    Running { index: usize },
    /// Waiting for the user to decide what to do with the original at `index`.
    PendingDecision { index: usize },
    /// Every file was processed.
    Completed,
    /// Stopped early on request.
    Cancelled,
}

impl WorkerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Completed | WorkerState::Cancelled)
    }

    /// Index of the file being handled, if any.
    pub fn current_index(&self) -> Option<usize> {
        match self {
            WorkerState::Running { index } | WorkerState::PendingDecision { index } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Idle => write!(f, "idle"),
            WorkerState::Running { index } => write!(f, "running #{}", index),
            WorkerState::PendingDecision { index } => write!(f, "pending decision #{}", index),
            WorkerState::Completed => write!(f, "completed"),
            WorkerState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// What to do with the original after a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Keep,
    Delete,
}

/// Why a file was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The registry has no route for this pair.
    NoRoute {
        source_format: Extension,
        target_format: Extension,
    },
    /// The session was cancelled while this file was being handled.
    Cancelled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRoute {
                source_format,
                target_format,
            } => write!(
                f,
                "No conversion route from .{} to .{}",
                source_format, target_format
            ),
            SkipReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result of processing one staged file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    Success {
        output_path: PathBuf,
        /// Whether the original is still on disk.
        kept: bool,
        /// Set when a requested deletion failed and the original was kept.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    Skipped {
        reason: SkipReason,
    },
    Error {
        message: String,
    },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success { .. })
    }
}

/// Tally of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub success: usize,
    pub skipped: usize,
    pub errors: usize,
    /// The session stopped before the end of the list.
    pub cancelled: bool,
}

impl SessionSummary {
    /// Counts `outcome` in the matching bucket.
    pub fn record(&mut self, outcome: &ConversionOutcome) {
        match outcome {
            ConversionOutcome::Success { .. } => self.success += 1,
            ConversionOutcome::Skipped { .. } => self.skipped += 1,
            ConversionOutcome::Error { .. } => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.skipped + self.errors
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} converted, {} skipped, {} errors",
            self.success, self.skipped, self.errors
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}
