//! FFmpeg-based converter for audio and video.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use crate::media::{Extension, MediaType};

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;

const AUDIO_FORMATS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a"];
const VIDEO_FORMATS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv"];

/// Number of trailing stderr lines kept for error reports.
const STDERR_TAIL_LINES: usize = 10;

/// FFmpeg-based converter. One instance serves either audio or video.
pub struct FfmpegConverter {
    config: ConverterConfig,
    media_type: MediaType,
}

impl FfmpegConverter {
    /// Creates an audio converter.
    pub fn audio(config: ConverterConfig) -> Self {
        Self {
            config,
            media_type: MediaType::Audio,
        }
    }

    /// Creates a video converter.
    pub fn video(config: ConverterConfig) -> Self {
        Self {
            config,
            media_type: MediaType::Video,
        }
    }

    /// Builds ffmpeg arguments. Codecs are left to ffmpeg's defaults for the
    /// output container.
    fn build_args(&self, input_path: &Path, output_path: &Path) -> Vec<String> {
        let mut args = vec![if self.config.overwrite { "-y" } else { "-n" }.to_string()];

        // Global options must precede the input
        args.extend(self.config.extra_ffmpeg_args.iter().cloned());

        args.extend([
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
        ]);

        if self.media_type == MediaType::Audio {
            // Drop embedded cover art streams that audio containers like wav reject
            args.push("-vn".to_string());
        }

        args.extend([
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ]);

        args.push(output_path.to_string_lossy().to_string());

        args
    }

    fn tool_error(&self, e: std::io::Error) -> ConverterError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConverterError::ToolNotFound {
                tool: "FFmpeg".to_string(),
                path: self.config.ffmpeg_path.clone(),
            }
        } else {
            ConverterError::Io(e)
        }
    }
}

/// Keeps the last few non-empty lines of ffmpeg's stderr.
fn stderr_tail(stderr: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return None;
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    Some(lines[start..].join("\n"))
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        match self.media_type {
            MediaType::Audio => "ffmpeg-audio",
            _ => "ffmpeg-video",
        }
    }

    async fn convert(
        &self,
        source: &Path,
        target_format: &Extension,
    ) -> Result<PathBuf, ConverterError> {
        if !self.supports_target(target_format) {
            return Err(ConverterError::unsupported_target(
                self.name(),
                target_format.as_str(),
            ));
        }

        let output_path = self.config.prepare_output(source, target_format).await?;
        let args = self.build_args(source, &output_path);
        let start = Instant::now();

        debug!("Running {:?} {:?}", self.config.ffmpeg_path, args);

        let output = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.tool_error(e))?;

        if !output.status.success() {
            return Err(ConverterError::conversion_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                stderr_tail(&output.stderr),
            ));
        }

        // Verify output exists
        tokio::fs::metadata(&output_path)
            .await
            .map_err(|_| ConverterError::conversion_failed("Output file not created", None))?;

        debug!(
            "Converted {} to {} in {} ms",
            source.display(),
            output_path.display(),
            start.elapsed().as_millis()
        );

        Ok(output_path)
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| self.tool_error(e))?;
        Ok(())
    }

    fn supported_output_formats(&self) -> &[&str] {
        match self.media_type {
            MediaType::Audio => AUDIO_FORMATS,
            _ => VIDEO_FORMATS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_audio_args() {
        let converter = FfmpegConverter::audio(ConverterConfig::default());
        let args = converter.build_args(Path::new("/input.wav"), Path::new("/output.mp3"));
        assert_eq!(args[0], "-y");
        assert_eq!(args[1], "-i");
        assert_eq!(args[2], "/input.wav");
        assert!(args.contains(&"-vn".to_string()));
        assert!(args.contains(&"-loglevel".to_string()));
        assert_eq!(args.last().unwrap(), "/output.mp3");
    }

    #[test]
    fn test_build_video_args_no_overwrite() {
        let config = ConverterConfig {
            extra_ffmpeg_args: vec!["-threads".to_string(), "2".to_string()],
            ..ConverterConfig::default().with_overwrite(false)
        };
        let converter = FfmpegConverter::video(config);
        let args = converter.build_args(Path::new("/in.mkv"), Path::new("/out.mp4"));
        assert_eq!(args[0], "-n");
        assert!(!args.contains(&"-vn".to_string()));
        assert_eq!(args.last().unwrap(), "/out.mp4");
    }

    #[test]
    fn test_extra_args_precede_input() {
        let config = ConverterConfig {
            extra_ffmpeg_args: vec!["-threads".to_string(), "2".to_string()],
            ..ConverterConfig::default()
        };
        let converter = FfmpegConverter::audio(config);
        let args = converter.build_args(Path::new("/in.flac"), Path::new("/out.mp3"));
        assert_eq!(&args[..5], &["-y", "-threads", "2", "-i", "/in.flac"]);
    }

    #[test]
    fn test_supported_formats() {
        let audio = FfmpegConverter::audio(ConverterConfig::default());
        assert!(audio.supports_target(&Extension::new("flac")));
        assert!(!audio.supports_target(&Extension::new("mp4")));

        let video = FfmpegConverter::video(ConverterConfig::default());
        assert!(video.supports_target(&Extension::new("mkv")));
        assert!(!video.supports_target(&Extension::new("wav")));
    }

    #[test]
    fn test_stderr_tail() {
        assert_eq!(stderr_tail(b""), None);
        assert_eq!(stderr_tail(b"\n  \n"), None);

        let many: String = (0..20).map(|i| format!("line {}\n", i)).collect();
        let tail = stderr_tail(many.as_bytes()).unwrap();
        assert_eq!(tail.lines().count(), STDERR_TAIL_LINES);
        assert!(tail.ends_with("line 19"));
    }

    #[tokio::test]
    async fn test_unsupported_target_rejected_before_running() {
        let converter = FfmpegConverter::audio(ConverterConfig::default());
        let err = converter
            .convert(Path::new("/input.wav"), &Extension::new("mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConverterError::UnsupportedTarget { .. }));
    }

    #[tokio::test]
    async fn test_missing_tool_reported() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.wav");
        std::fs::write(&source, b"RIFF").unwrap();

        let config = ConverterConfig {
            ffmpeg_path: PathBuf::from("/nonexistent/ffmpeg"),
            ..Default::default()
        };
        let converter = FfmpegConverter::audio(config);
        let err = converter
            .convert(&source, &Extension::new("mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConverterError::ToolNotFound { .. }));
    }
}
