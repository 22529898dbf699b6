use std::path::PathBuf;

use clap::Parser;

use fileconv_core::DecisionPolicy;

/// Convert local files between image, video, audio and document formats.
#[derive(Debug, Parser)]
#[command(name = "fileconv", version, about)]
pub struct Args {
    /// Files to convert. Directories are listed and offered for selection.
    pub paths: Vec<PathBuf>,

    /// Target format (e.g. jpg, mp3, txt). Asked interactively when omitted.
    #[arg(short, long, value_name = "FORMAT")]
    pub target: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "FILECONV_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep every original without asking
    #[arg(long, conflicts_with = "delete_all")]
    pub keep_all: bool,

    /// Delete every original after a successful conversion without asking
    #[arg(long)]
    pub delete_all: bool,

    /// Directory for session logs
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Decision policy forced by flags, overriding the config file.
    pub fn decision_policy(&self) -> Option<DecisionPolicy> {
        if self.keep_all {
            Some(DecisionPolicy::Keep)
        } else if self.delete_all {
            Some(DecisionPolicy::Delete)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_and_target() {
        let args = Args::try_parse_from(["fileconv", "a.png", "photos", "-t", "jpg"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("a.png"), PathBuf::from("photos")]);
        assert_eq!(args.target.as_deref(), Some("jpg"));
        assert_eq!(args.decision_policy(), None);
    }

    #[test]
    fn test_decision_flags() {
        let args = Args::try_parse_from(["fileconv", "--delete-all", "a.wav"]).unwrap();
        assert_eq!(args.decision_policy(), Some(DecisionPolicy::Delete));

        let args = Args::try_parse_from(["fileconv", "--keep-all"]).unwrap();
        assert_eq!(args.decision_policy(), Some(DecisionPolicy::Keep));
    }

    #[test]
    fn test_keep_and_delete_conflict() {
        assert!(Args::try_parse_from(["fileconv", "--keep-all", "--delete-all"]).is_err());
    }
}
