use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::worker::SessionSummary;

/// Records sent from the worker to the session reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionRecord {
    Converted {
        source: PathBuf,
        output: PathBuf,
        kept: bool,
    },
    Skipped {
        source: PathBuf,
        reason: String,
    },
    Failed {
        source: PathBuf,
        message: String,
    },
    OriginalDeleted {
        source: PathBuf,
    },
    Summary {
        summary: SessionSummary,
    },
}

impl SessionRecord {
    /// Get the record type as a string
    pub fn record_type(&self) -> &'static str {
        match self {
            Self::Converted { .. } => "converted",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
            Self::OriginalDeleted { .. } => "original_deleted",
            Self::Summary { .. } => "summary",
        }
    }

    /// Source file this record is about, if any
    pub fn source(&self) -> Option<&Path> {
        match self {
            Self::Converted { source, .. }
            | Self::Skipped { source, .. }
            | Self::Failed { source, .. }
            | Self::OriginalDeleted { source } => Some(source),
            Self::Summary { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_is_tagged() {
        let record = SessionRecord::Converted {
            source: PathBuf::from("/p/a.heic"),
            output: PathBuf::from("/p/a.jpg"),
            kept: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "converted");
        assert_eq!(json["kept"], true);

        let back: SessionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_type_and_source() {
        let record = SessionRecord::OriginalDeleted {
            source: PathBuf::from("/p/a.heic"),
        };
        assert_eq!(record.record_type(), "original_deleted");
        assert_eq!(record.source(), Some(Path::new("/p/a.heic")));

        let summary = SessionRecord::Summary {
            summary: SessionSummary::default(),
        };
        assert_eq!(summary.source(), None);
    }
}
