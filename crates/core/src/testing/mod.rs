//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`Converter`](crate::converter::Converter), an
//! in-memory [`SessionReporter`](crate::report::SessionReporter) and fixtures,
//! so the worker can be exercised without ffmpeg or a log directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fileconv_core::testing::{fixtures, MemoryReporter, MockConverter};
//!
//! let converter = MockConverter::new();
//! let reporter = Arc::new(MemoryReporter::new());
//! let (report, writer) = create_report_system(reporter.clone(), 16);
//!
//! let worker = ConversionWorker::new(fixtures::registry(), fixtures::converters(&converter))
//!     .with_report(report);
//! ```

mod memory_reporter;
mod mock_converter;

pub use memory_reporter::MemoryReporter;
pub use mock_converter::{MockConverter, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use crate::converter::{Converter, ConverterSet};
    use crate::registry::ConversionRegistry;
    use crate::staging::{StagedFile, StagingArea};

    use super::MockConverter;

    /// The built-in registry, shared.
    pub fn registry() -> Arc<ConversionRegistry> {
        Arc::new(ConversionRegistry::with_defaults().expect("built-in routes are valid"))
    }

    /// A converter set where every kind resolves to `converter`.
    pub fn converters(converter: &MockConverter) -> Arc<ConverterSet> {
        let converter: Arc<dyn Converter> = Arc::new(converter.clone());
        Arc::new(ConverterSet::uniform(converter))
    }

    /// Stages `paths` in order, panicking on rejection.
    pub fn staged<P: AsRef<Path>>(paths: &[P]) -> Vec<StagedFile> {
        let mut staging = StagingArea::new();
        for path in paths {
            staging
                .stage(path.as_ref())
                .expect("fixture path should be stageable");
        }
        staging.into_files()
    }

    /// Creates one small file per name inside `dir`.
    pub fn write_files(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                std::fs::write(&path, name.as_bytes()).expect("fixture file should be writable");
                path
            })
            .collect()
    }

    /// Writes a real `width`x`height` RGBA PNG with a gradient.
    pub fn write_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            image::Rgba([r, g, 128, 200])
        });
        img.save(path).expect("fixture PNG should be writable");
    }
}
