use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::converter::ConverterConfig;
use crate::worker::{Decision, DEFAULT_EVENT_BUFFER};

/// Root configuration
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Session log configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Directory receiving `converter_<timestamp>.log` files
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Interactive front-end configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Directory listed when no paths are given on the command line
    #[serde(default)]
    pub start_dir: Option<PathBuf>,
    /// Include dot-files in directory listings
    #[serde(default)]
    pub show_hidden: bool,
    /// How keep/delete prompts are answered
    #[serde(default)]
    pub decision_policy: DecisionPolicy,
    /// Capacity of the worker event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_dir: None,
            show_hidden: false,
            decision_policy: DecisionPolicy::default(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

/// Answer given to keep/delete prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPolicy {
    /// Ask for every file
    #[default]
    Ask,
    /// Always keep originals
    Keep,
    /// Always delete originals
    Delete,
}

impl DecisionPolicy {
    /// The decision to apply without prompting, if any.
    pub fn fixed_decision(&self) -> Option<Decision> {
        match self {
            DecisionPolicy::Ask => None,
            DecisionPolicy::Keep => Some(Decision::Keep),
            DecisionPolicy::Delete => Some(Decision::Delete),
        }
    }
}
