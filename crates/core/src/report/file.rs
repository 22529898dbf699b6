use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};

use crate::worker::SessionSummary;

use super::reporter::{ReportError, SessionReporter};

const RULE_WIDTH: usize = 80;

/// Severity column of a log line.
#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

/// File name of a session log started at `started`.
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("converter_{}.log", started.format("%Y%m%d_%H%M%S"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Human-readable session log, one file per session.
///
/// The file (and its directory) is created on the first write, so a session
/// that never records anything leaves no file behind.
pub struct FileSessionReporter {
    path: PathBuf,
    file: Mutex<Option<BufWriter<File>>>,
}

impl FileSessionReporter {
    /// Reporter writing to a timestamped file inside `log_dir`.
    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        Self::with_path(log_dir.as_ref().join(log_file_name(Local::now())))
    }

    /// Reporter writing to exactly `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<BufWriter<File>, ReportError> {
        let open_error = |source| ReportError::Open {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(open_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(open_error)?;
        Ok(BufWriter::new(file))
    }

    fn write_lines(&self, level: Level, lines: &[String]) -> Result<(), ReportError> {
        let mut guard = self.file.lock().unwrap_or_else(|p| p.into_inner());

        if guard.is_none() {
            let mut writer = self.open()?;
            let rule = "=".repeat(RULE_WIDTH);
            for message in [rule.as_str(), "File Conversion Session Started", rule.as_str()] {
                Self::write_line(&mut writer, Level::Info, message)?;
            }
            *guard = Some(writer);
        }

        if let Some(writer) = guard.as_mut() {
            for line in lines {
                Self::write_line(writer, level, line)?;
            }
            writer.flush()?;
        }
        Ok(())
    }

    fn write_line(
        writer: &mut BufWriter<File>,
        level: Level,
        message: &str,
    ) -> Result<(), ReportError> {
        writeln!(
            writer,
            "{} | {:<8} | {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level.as_str(),
            message
        )?;
        Ok(())
    }
}

impl SessionReporter for FileSessionReporter {
    fn record_success(
        &self,
        source: &Path,
        output: &Path,
        kept: bool,
    ) -> Result<(), ReportError> {
        let line = format!(
            "SUCCESS | {} -> {} | original {}",
            file_name(source),
            file_name(output),
            if kept { "kept" } else { "deleted" }
        );
        self.write_lines(Level::Info, &[line])
    }

    fn record_skip(&self, source: &Path, reason: &str) -> Result<(), ReportError> {
        let line = format!("SKIPPED | {} | {}", file_name(source), reason);
        self.write_lines(Level::Info, &[line])
    }

    fn record_error(&self, source: &Path, message: &str) -> Result<(), ReportError> {
        let line = format!("ERROR | {} | {}", file_name(source), message);
        self.write_lines(Level::Error, &[line])
    }

    fn record_deleted(&self, source: &Path) -> Result<(), ReportError> {
        let line = format!("DELETED | {}", file_name(source));
        self.write_lines(Level::Warning, &[line])
    }

    fn record_summary(&self, summary: &SessionSummary) -> Result<(), ReportError> {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            "Session Summary:".to_string(),
            format!("  Success: {}", summary.success),
            format!("  Skipped: {}", summary.skipped),
            format!("  Errors: {}", summary.errors),
        ];
        if summary.cancelled {
            lines.push("  Cancelled: yes".to_string());
        }
        lines.push(rule);
        self.write_lines(Level::Info, &lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn read_messages(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.splitn(3, " | ").nth(2).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_log_file_name() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(log_file_name(started), "converter_20240309_140507.log");
    }

    #[test]
    fn test_file_created_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = FileSessionReporter::new(dir.path().join("logs"));
        assert!(!reporter.log_path().exists());

        reporter
            .record_skip(Path::new("/in/x.docx"), "No conversion route from .docx to .jpg")
            .unwrap();
        assert!(reporter.log_path().exists());
        assert!(reporter
            .log_path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("converter_"));
    }

    #[test]
    fn test_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = FileSessionReporter::with_path(dir.path().join("session.log"));

        reporter
            .record_success(Path::new("/in/a.heic"), Path::new("/in/a.jpg"), true)
            .unwrap();
        reporter.record_deleted(Path::new("/in/b.png")).unwrap();
        reporter
            .record_error(Path::new("/in/c.png"), "Decode error: bad header")
            .unwrap();

        let content = fs::read_to_string(reporter.log_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].ends_with("| INFO     | File Conversion Session Started"));
        assert!(lines[3].ends_with("| INFO     | SUCCESS | a.heic -> a.jpg | original kept"));
        assert!(lines[4].ends_with("| WARNING  | DELETED | b.png"));
        assert!(lines[5].ends_with("| ERROR    | ERROR | c.png | Decode error: bad header"));

        // "YYYY-MM-DD HH:MM:SS" prefix
        assert_eq!(lines[3].find(" | "), Some(19));
    }

    #[test]
    fn test_summary_block() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = FileSessionReporter::with_path(dir.path().join("session.log"));

        reporter
            .record_summary(&SessionSummary {
                success: 2,
                skipped: 1,
                errors: 0,
                cancelled: true,
            })
            .unwrap();

        let messages = read_messages(reporter.log_path());
        let rule = "=".repeat(RULE_WIDTH);
        assert_eq!(
            &messages[3..],
            &[
                rule.clone(),
                "Session Summary:".to_string(),
                "  Success: 2".to_string(),
                "  Skipped: 1".to_string(),
                "  Errors: 0".to_string(),
                "  Cancelled: yes".to_string(),
                rule,
            ]
        );
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();

        let reporter = FileSessionReporter::with_path(blocker.join("session.log"));
        let err = reporter.record_deleted(Path::new("/in/a.png")).unwrap_err();
        assert!(matches!(err, ReportError::Open { .. }));
    }
}
