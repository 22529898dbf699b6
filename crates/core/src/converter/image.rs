//! Image converter built on the `image` crate, with `heif-convert` for HEIC input.

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::media::Extension;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;

const IMAGE_FORMATS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff"];

/// Targets `heif-convert` can write directly.
const HEIF_TARGETS: &[&str] = &["jpg", "jpeg", "png"];

/// Converts image files between common formats.
pub struct ImageConverter {
    config: ConverterConfig,
}

impl ImageConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// HEIC is not decodable by the `image` crate; delegate to libheif's CLI.
    async fn convert_heif(
        &self,
        source: &Path,
        output_path: &Path,
        target_format: &Extension,
    ) -> Result<(), ConverterError> {
        if !HEIF_TARGETS.contains(&target_format.as_str()) {
            return Err(ConverterError::UnsupportedRoute {
                source_format: "heic".to_string(),
                target_format: target_format.to_string(),
            });
        }

        let mut command = Command::new(&self.config.heif_convert_path);
        if target_format.as_str() != "png" {
            command.arg("-q").arg(self.config.jpeg_quality.to_string());
        }

        let output = command
            .arg(source)
            .arg(output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::ToolNotFound {
                        tool: "heif-convert".to_string(),
                        path: self.config.heif_convert_path.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ConverterError::conversion_failed(
                format!("heif-convert exited with code: {:?}", output.status.code()),
                (!stderr.is_empty()).then_some(stderr),
            ));
        }

        // heif-convert can exit cleanly without writing anything
        tokio::fs::metadata(output_path)
            .await
            .map_err(|_| ConverterError::conversion_failed("Output file not created", None))?;
        Ok(())
    }
}

/// Decodes `source` and encodes it as `format` at `output_path`.
fn transcode(
    source: &Path,
    output_path: &Path,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<(), ConverterError> {
    let img = image::open(source).map_err(|e| ConverterError::decode(e.to_string()))?;

    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let writer = BufWriter::new(File::create(output_path)?);
            let encoder = JpegEncoder::new_with_quality(writer, jpeg_quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)
                .map_err(|e| ConverterError::conversion_failed(e.to_string(), None))
        }
        ImageFormat::WebP | ImageFormat::Gif => {
            // These encoders only accept 8-bit RGBA/RGB buffers
            DynamicImage::ImageRgba8(img.to_rgba8())
                .save_with_format(output_path, format)
                .map_err(|e| ConverterError::conversion_failed(e.to_string(), None))
        }
        _ => img
            .save_with_format(output_path, format)
            .map_err(|e| ConverterError::conversion_failed(e.to_string(), None)),
    }
}

#[async_trait]
impl Converter for ImageConverter {
    fn name(&self) -> &str {
        "image"
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
        let format = ImageFormat::from_extension(target_format.as_str())
            .ok_or_else(|| ConverterError::unsupported_target(self.name(), target_format.as_str()))?;

        let output_path = self.config.prepare_output(source, target_format).await?;

        let is_heif = Extension::from_path(source)
            .map(|e| matches!(e.as_str(), "heic" | "heif"))
            .unwrap_or(false);

        if is_heif {
            self.convert_heif(source, &output_path, target_format).await?;
        } else {
            let source_owned = source.to_path_buf();
            let output_owned = output_path.clone();
            let quality = self.config.jpeg_quality;
            tokio::task::spawn_blocking(move || {
                transcode(&source_owned, &output_owned, format, quality)
            })
            .await
            .map_err(|e| ConverterError::conversion_failed(format!("Image task failed: {}", e), None))??;
        }

        debug!("Converted {} to {}", source.display(), output_path.display());
        Ok(output_path)
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        // heif-convert is optional; only HEIC sources need it
        Ok(())
    }

    fn supported_output_formats(&self) -> &[&str] {
        IMAGE_FORMATS
    }
}
