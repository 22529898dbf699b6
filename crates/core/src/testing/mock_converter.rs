//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{Converter, ConverterConfig, ConverterError};
use crate::media::Extension;

/// A recorded conversion for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    pub source: PathBuf,
    pub target_format: Extension,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversions for assertions
/// - Simulate failures, once or per source path
/// - Simulate slow conversions
/// - Optionally write the output file so on-disk effects can be checked
///
/// Clones share state, so a test can keep one clone while the worker owns
/// another.
///
/// # Example
///
/// ```rust,ignore
/// use fileconv_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.fail_for("/photos/broken.png", "corrupt header").await;
///
/// let converters = Arc::new(ConverterSet::uniform(Arc::new(converter.clone())));
/// // ... run a worker ...
///
/// assert_eq!(converter.conversion_count().await, 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    failures: Arc<RwLock<HashMap<PathBuf, String>>>,
    /// If set, the next conversion will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    conversion_duration_ms: Arc<RwLock<u64>>,
    write_output: Arc<RwLock<bool>>,
    output: ConverterConfig,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
            conversion_duration_ms: Arc::new(RwLock::new(0)),
            write_output: Arc::new(RwLock::new(false)),
            output: ConverterConfig::default(),
        }
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Make every conversion of `source` fail with `reason`.
    pub async fn fail_for(&self, source: impl AsRef<Path>, reason: impl Into<String>) {
        self.failures
            .write()
            .await
            .insert(source.as_ref().to_path_buf(), reason.into());
    }

    /// Configure the next conversion to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Write a placeholder output file next to the source on success.
    pub async fn set_write_output(&self, write: bool) {
        *self.write_output.write().await = write;
    }

    async fn outcome(&self, source: &Path) -> Result<(), ConverterError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if let Some(reason) = self.failures.read().await.get(source) {
            return Err(ConverterError::conversion_failed(reason.clone(), None));
        }
        Ok(())
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(
        &self,
        source: &Path,
        target_format: &Extension,
    ) -> Result<PathBuf, ConverterError> {
        let duration = *self.conversion_duration_ms.read().await;
        if duration > 0 {
            tokio::time::sleep(Duration::from_millis(duration)).await;
        }

        let mut result = self.outcome(source).await;
        let output_path = self.output.output_path(source, target_format);

        if result.is_ok() && *self.write_output.read().await {
            let contents = format!("converted from {}\n", source.display());
            result = tokio::fs::write(&output_path, contents)
                .await
                .map_err(ConverterError::from);
        }

        self.conversions.write().await.push(RecordedConversion {
            source: source.to_path_buf(),
            target_format: target_format.clone(),
            success: result.is_ok(),
        });

        result.map(|()| output_path)
    }

    fn supported_output_formats(&self) -> &[&str] {
        &[]
    }

    fn supports_target(&self, _target_format: &Extension) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_conversions() {
        let converter = MockConverter::new();
        let output = converter
            .convert(Path::new("/p/a.png"), &Extension::new("jpg"))
            .await
            .unwrap();
        assert_eq!(output, PathBuf::from("/p/a.jpg"));

        let recorded = converter.recorded_conversions().await;
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].success);
        assert_eq!(recorded[0].target_format.as_str(), "jpg");
    }

    #[tokio::test]
    async fn test_next_error_applies_once() {
        let converter = MockConverter::new();
        converter
            .set_next_error(ConverterError::conversion_failed("boom", None))
            .await;

        let target = Extension::new("jpg");
        assert!(converter.convert(Path::new("/p/a.png"), &target).await.is_err());
        assert!(converter.convert(Path::new("/p/a.png"), &target).await.is_ok());
    }

    #[tokio::test]
    async fn test_fail_for_path_and_shared_state() {
        let converter = MockConverter::new();
        let clone = converter.clone();
        clone.fail_for("/p/bad.png", "corrupt").await;

        let target = Extension::new("jpg");
        let err = converter
            .convert(Path::new("/p/bad.png"), &target)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("corrupt"));
        assert!(converter.convert(Path::new("/p/good.png"), &target).await.is_ok());
        assert_eq!(clone.conversion_count().await, 2);
    }

    #[tokio::test]
    async fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.png");
        std::fs::write(&source, b"png").unwrap();

        let converter = MockConverter::new();
        converter.set_write_output(true).await;
        let output = converter
            .convert(&source, &Extension::new("jpg"))
            .await
            .unwrap();
        assert!(output.exists());
    }
}
