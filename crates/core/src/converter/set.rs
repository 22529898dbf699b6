//! Lazily constructed converter instances, one per converter kind.

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::registry::ConverterKind;

use super::config::ConverterConfig;
use super::document::DocumentConverter;
use super::ffmpeg::FfmpegConverter;
use super::image::ImageConverter;
use super::traits::Converter;

type ConverterFactory = dyn Fn(ConverterKind) -> Arc<dyn Converter> + Send + Sync;

/// Resolves a [`ConverterKind`] to a converter, building each one on first use.
pub struct ConverterSet {
    factory: Box<ConverterFactory>,
    image: OnceCell<Arc<dyn Converter>>,
    video: OnceCell<Arc<dyn Converter>>,
    audio: OnceCell<Arc<dyn Converter>>,
    document: OnceCell<Arc<dyn Converter>>,
}

impl ConverterSet {
    /// Creates a set backed by the real converters.
    pub fn new(config: ConverterConfig) -> Self {
        Self::from_factory(move |kind| -> Arc<dyn Converter> {
            match kind {
                ConverterKind::Image => Arc::new(ImageConverter::new(config.clone())),
                ConverterKind::Video => Arc::new(FfmpegConverter::video(config.clone())),
                ConverterKind::Audio => Arc::new(FfmpegConverter::audio(config.clone())),
                ConverterKind::Document => Arc::new(DocumentConverter::new(config.clone())),
            }
        })
    }

    /// Creates a set that builds converters with `factory`.
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn(ConverterKind) -> Arc<dyn Converter> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            image: OnceCell::new(),
            video: OnceCell::new(),
            audio: OnceCell::new(),
            document: OnceCell::new(),
        }
    }

    /// Creates a set where every kind resolves to `converter`.
    pub fn uniform(converter: Arc<dyn Converter>) -> Self {
        Self::from_factory(move |_| Arc::clone(&converter))
    }

    fn cell(&self, kind: ConverterKind) -> &OnceCell<Arc<dyn Converter>> {
        match kind {
            ConverterKind::Image => &self.image,
            ConverterKind::Video => &self.video,
            ConverterKind::Audio => &self.audio,
            ConverterKind::Document => &self.document,
        }
    }

    /// Returns the converter for `kind`, constructing it if needed.
    pub fn get(&self, kind: ConverterKind) -> Arc<dyn Converter> {
        let converter = self.cell(kind).get_or_init(|| {
            debug!("Constructing {}", kind);
            (self.factory)(kind)
        });
        Arc::clone(converter)
    }

    /// Whether the converter for `kind` has been constructed yet.
    pub fn is_initialized(&self, kind: ConverterKind) -> bool {
        self.cell(kind).get().is_some()
    }
}

impl fmt::Debug for ConverterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterSet")
            .field("image", &self.is_initialized(ConverterKind::Image))
            .field("video", &self.is_initialized(ConverterKind::Video))
            .field("audio", &self.is_initialized(ConverterKind::Audio))
            .field("document", &self.is_initialized(ConverterKind::Document))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_converters_built_lazily_and_once() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let set = ConverterSet::from_factory(move |_kind| -> Arc<dyn Converter> {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(DocumentConverter::new(ConverterConfig::default()))
        });

        assert_eq!(built.load(Ordering::SeqCst), 0);
        assert!(!set.is_initialized(ConverterKind::Document));

        set.get(ConverterKind::Document);
        set.get(ConverterKind::Document);
        assert_eq!(built.load(Ordering::SeqCst), 1);
        assert!(set.is_initialized(ConverterKind::Document));
        assert!(!set.is_initialized(ConverterKind::Image));
    }

    #[test]
    fn test_default_set_resolves_by_kind() {
        let set = ConverterSet::new(ConverterConfig::default());
        assert_eq!(set.get(ConverterKind::Image).name(), "image");
        assert_eq!(set.get(ConverterKind::Audio).name(), "ffmpeg-audio");
        assert_eq!(set.get(ConverterKind::Video).name(), "ffmpeg-video");
        assert_eq!(set.get(ConverterKind::Document).name(), "document");
    }

    #[test]
    fn test_uniform_set_shares_instance() {
        let converter: Arc<dyn Converter> =
            Arc::new(ImageConverter::new(ConverterConfig::default()));
        let set = ConverterSet::uniform(Arc::clone(&converter));
        assert!(Arc::ptr_eq(&set.get(ConverterKind::Audio), &converter));
        assert!(Arc::ptr_eq(&set.get(ConverterKind::Image), &converter));
    }
}
