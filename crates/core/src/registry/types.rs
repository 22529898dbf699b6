//! Types for the registry module.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::media::{Extension, MediaType};

/// Reference to the converter capability that performs a route.
///
/// There is exactly one converter implementation per media type; the route
/// carries the kind and the [`ConverterSet`](crate::converter::ConverterSet)
/// resolves it to an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    Image,
    Video,
    Audio,
    Document,
}

impl ConverterKind {
    /// The converter kind serving a media type.
    pub fn for_media_type(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Image => ConverterKind::Image,
            MediaType::Video => ConverterKind::Video,
            MediaType::Audio => ConverterKind::Audio,
            MediaType::Document => ConverterKind::Document,
        }
    }

    /// The media type this converter kind serves.
    pub fn media_type(&self) -> MediaType {
        match self {
            ConverterKind::Image => MediaType::Image,
            ConverterKind::Video => MediaType::Video,
            ConverterKind::Audio => MediaType::Audio,
            ConverterKind::Document => MediaType::Document,
        }
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-converter", self.media_type())
    }
}

/// A single supported conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRoute {
    /// Source extension, e.g. `heic`.
    pub source_format: Extension,
    /// Target extension, e.g. `jpg`.
    pub target_format: Extension,
    /// Converter that performs this route.
    pub converter: ConverterKind,
    /// Whether the conversion loses quality; the user is warned if so.
    pub lossy: bool,
}

impl ConversionRoute {
    /// Creates a route.
    pub fn new(
        source_format: impl Into<Extension>,
        target_format: impl Into<Extension>,
        converter: ConverterKind,
        lossy: bool,
    ) -> Self {
        Self {
            source_format: source_format.into(),
            target_format: target_format.into(),
            converter,
            lossy,
        }
    }

    /// Key under which the route is stored.
    pub(crate) fn key(&self) -> (Extension, Extension) {
        (self.source_format.clone(), self.target_format.clone())
    }
}
