//! Terminal rendering and prompts.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};

use fileconv_core::{ConversionOutcome, Decision, DecisionRequest, Extension, SessionSummary};

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Regular files directly inside `dir`, sorted by name.
pub fn list_directory(dir: &Path, show_hidden: bool) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !show_hidden && is_hidden(&path) {
            continue;
        }
        if entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Lets the user pick files from a directory listing. Nothing is
/// preselected.
pub fn pick_files(dir: &Path, candidates: &[PathBuf]) -> dialoguer::Result<Vec<PathBuf>> {
    let items: Vec<String> = candidates.iter().map(|p| display_name(p)).collect();
    let selected = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Select files from {} (space to toggle, enter to confirm)",
            dir.display()
        ))
        .items(&items)
        .interact()?;
    Ok(selected.into_iter().map(|i| candidates[i].clone()).collect())
}

/// Asks for the target format among `targets`.
pub fn pick_target(targets: &BTreeSet<Extension>) -> dialoguer::Result<Extension> {
    let items: Vec<String> = targets.iter().map(|t| format!(".{}", t)).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Convert to")
        .items(&items)
        .default(0)
        .interact()?;
    let target = targets.iter().nth(index).cloned();
    target.ok_or_else(|| dialoguer::Error::IO(io::Error::other("no target selected")))
}

/// Keep/delete prompt for one converted file.
pub fn ask_decision(source: &Path, output: &Path) -> dialoguer::Result<Decision> {
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "{} converted to {}. Keep original?",
            display_name(source),
            display_name(output)
        ))
        .items(&["Keep original", "Delete original"])
        .default(0)
        .interact()?;
    Ok(if index == 1 {
        Decision::Delete
    } else {
        Decision::Keep
    })
}

pub fn print_rejected(path: &Path, reason: &dyn std::fmt::Display) {
    eprintln!("{} {}: {}", style("✗").red(), display_name(path), reason);
}

/// One-line rendering of a finished item.
pub fn outcome_line(source: &Path, outcome: &ConversionOutcome) -> String {
    let name = display_name(source);
    match outcome {
        ConversionOutcome::Success {
            output_path,
            kept,
            note,
        } => {
            let mut line = format!(
                "{}  {}  →  {}",
                style("✓").green(),
                name,
                display_name(output_path)
            );
            if !kept {
                line.push_str(&format!("  {}", style("(original deleted)").dim()));
            }
            if let Some(note) = note {
                line.push_str(&format!("  {}", style(note).yellow()));
            }
            line
        }
        ConversionOutcome::Skipped { reason } => {
            format!("{}  {}  {}", style("-").dim(), name, style(reason).dim())
        }
        ConversionOutcome::Error { message } => {
            format!("{}  {}  {}", style("✗").red(), name, message)
        }
    }
}

pub fn summary_line(summary: &SessionSummary) -> String {
    let mut line = format!(
        "Done: {} {} converted  {} {} skipped  {} {} errors",
        style("✓").green(),
        summary.success,
        style("-").dim(),
        summary.skipped,
        style("✗").red(),
        summary.errors
    );
    if summary.cancelled {
        line.push_str(&format!("  {}", style("(cancelled)").yellow()));
    }
    line
}

/// Progress bar over the staged files. Lines are printed above the bar.
#[derive(Clone)]
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn new(total: usize, target: &Extension) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        bar.set_style(style);
        bar.println(format!(
            "Converting {} file(s) → .{}",
            total,
            target.as_str().to_uppercase()
        ));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn item_started(&self, path: &Path) {
        self.bar.set_message(display_name(path));
    }

    pub fn warning(&self, message: &str) {
        self.bar
            .println(format!("{}  {}", style("⚠").yellow(), message));
    }

    pub fn item_finished(&self, path: &Path, outcome: &ConversionOutcome) {
        self.bar.println(outcome_line(path, outcome));
        self.bar.inc(1);
    }

    pub fn println(&self, line: impl AsRef<str>) {
        self.bar.println(line);
    }

    /// Runs the keep/delete prompt with the bar hidden.
    pub fn ask(&self, request: &DecisionRequest) -> dialoguer::Result<Decision> {
        self.bar
            .suspend(|| ask_decision(&request.source, &request.output))
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileconv_core::SkipReason;

    #[test]
    fn test_list_directory_filters_hidden_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", ".hidden.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.png"), b"x").unwrap();

        let names: Vec<String> = list_directory(dir.path(), false)
            .unwrap()
            .iter()
            .map(|p| display_name(p))
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);

        let with_hidden = list_directory(dir.path(), true).unwrap();
        assert_eq!(with_hidden.len(), 3);
    }

    #[test]
    fn test_outcome_line() {
        console::set_colors_enabled(false);
        let line = outcome_line(
            Path::new("/p/a.heic"),
            &ConversionOutcome::Success {
                output_path: PathBuf::from("/p/a.jpg"),
                kept: false,
                note: None,
            },
        );
        assert_eq!(line, "✓  a.heic  →  a.jpg  (original deleted)");

        let line = outcome_line(
            Path::new("/p/x.docx"),
            &ConversionOutcome::Skipped {
                reason: SkipReason::Cancelled,
            },
        );
        assert_eq!(line, "-  x.docx  cancelled");
    }

    #[test]
    fn test_summary_line() {
        console::set_colors_enabled(false);
        let summary = SessionSummary {
            success: 2,
            skipped: 1,
            errors: 0,
            cancelled: true,
        };
        assert_eq!(
            summary_line(&summary),
            "Done: ✓ 2 converted  - 1 skipped  ✗ 0 errors  (cancelled)"
        );
    }
}
