//! Converter module: the capabilities that perform one concrete conversion.
//!
//! Every converter implements the [`Converter`] trait: given a source path and
//! a target [`Extension`](crate::media::Extension) it writes the converted
//! file and returns its path. Which converter handles which pair is decided
//! by the [`ConversionRegistry`](crate::registry::ConversionRegistry); the
//! converters themselves only check that they can produce the target.
//!
//! # Implementations
//!
//! - [`ImageConverter`]: raster formats via the `image` crate, HEIC via `heif-convert`
//! - [`FfmpegConverter`]: audio and video via an `ffmpeg` subprocess
//! - [`DocumentConverter`]: text extraction from PDF and DOCX
//!
//! # Example
//!
//! ```ignore
//! use fileconv_core::converter::{ConverterConfig, ConverterSet};
//! use fileconv_core::registry::ConverterKind;
//!
//! let converters = ConverterSet::new(ConverterConfig::default());
//! let image = converters.get(ConverterKind::Image);
//! let output = image.convert(Path::new("photo.png"), &"jpg".into()).await?;
//! ```

mod config;
mod document;
mod error;
mod ffmpeg;
mod image;
mod set;
mod traits;

pub use config::ConverterConfig;
pub use document::DocumentConverter;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use image::ImageConverter;
pub use set::ConverterSet;
pub use traits::Converter;
