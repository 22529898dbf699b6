//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::media::Extension;

use super::error::ConverterError;

/// A converter that can transform a file into another format.
///
/// Implementations write the output next to the source unless configured
/// otherwise and return the output path. One implementation exists per media
/// type; it is selected through the route's
/// [`ConverterKind`](crate::registry::ConverterKind).
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts `source` into `target_format`, returning the output path.
    ///
    /// May take an unbounded amount of time; no timeout is applied.
    async fn convert(
        &self,
        source: &Path,
        target_format: &Extension,
    ) -> Result<PathBuf, ConverterError>;

    /// Validates that the converter is properly configured and ready.
    async fn validate(&self) -> Result<(), ConverterError> {
        Ok(())
    }

    /// Returns the supported output formats.
    fn supported_output_formats(&self) -> &[&str];

    /// Whether this converter can produce `target_format`.
    fn supports_target(&self, target_format: &Extension) -> bool {
        self.supported_output_formats()
            .iter()
            .any(|f| *f == target_format.as_str())
    }
}
