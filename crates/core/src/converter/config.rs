//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::media::Extension;

use super::error::ConverterError;

/// Configuration shared by all converter implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path to ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Path to the libheif `heif-convert` binary used for HEIC input.
    #[serde(default = "default_heif_convert_path")]
    pub heif_convert_path: PathBuf,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[serde(default = "default_log_level")]
    pub ffmpeg_log_level: String,

    /// Additional global ffmpeg arguments.
    #[serde(default)]
    pub extra_ffmpeg_args: Vec<String>,

    /// Directory for converted files. When unset, output lands next to the source.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// JPEG encoding quality (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Whether an existing output file may be replaced.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_heif_convert_path() -> PathBuf {
    PathBuf::from("heif-convert")
}

fn default_log_level() -> String {
    "error".to_string()
}

fn default_jpeg_quality() -> u8 {
    90
}

fn default_overwrite() -> bool {
    true
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            heif_convert_path: default_heif_convert_path(),
            ffmpeg_log_level: default_log_level(),
            extra_ffmpeg_args: Vec::new(),
            output_dir: None,
            jpeg_quality: default_jpeg_quality(),
            overwrite: default_overwrite(),
        }
    }
}

impl ConverterConfig {
    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Sets whether existing outputs may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output path for converting `source` to `target_format`.
    ///
    /// Keeps the source's file stem and swaps the extension.
    pub fn output_path(&self, source: &Path, target_format: &Extension) -> PathBuf {
        let file_name = match source.file_stem() {
            Some(stem) => {
                let mut name = stem.to_os_string();
                name.push(".");
                name.push(target_format.as_str());
                name
            }
            None => format!("output.{}", target_format).into(),
        };

        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => source.with_file_name(file_name),
        }
    }

    /// Checks the input and prepares the output location, returning the
    /// output path.
    pub(crate) async fn prepare_output(
        &self,
        source: &Path,
        target_format: &Extension,
    ) -> Result<PathBuf, ConverterError> {
        if !tokio::fs::try_exists(source).await.unwrap_or(false) {
            return Err(ConverterError::InputNotFound {
                path: source.to_path_buf(),
            });
        }

        let output = self.output_path(source, target_format);
        if output == source {
            return Err(ConverterError::UnsupportedRoute {
                source_format: target_format.to_string(),
                target_format: target_format.to_string(),
            });
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                ConverterError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }

        if !self.overwrite && tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(ConverterError::OutputExists { path: output });
        }

        Ok(output)
    }
}
