//! Types for media classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Broad media domain a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaType {
    /// All media types, in display order.
    pub const ALL: [MediaType; 4] = [
        MediaType::Image,
        MediaType::Video,
        MediaType::Audio,
        MediaType::Document,
    ];

    /// Lowercase name used in messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Document => "document",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized file extension: lowercase, without the leading dot.
///
/// Construction never fails; whether the extension is *known* is decided by
/// [`classify`](super::classify).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Extension(String);

impl Extension {
    /// Normalizes `raw` into an extension (`".JPG"` becomes `"jpg"`).
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
        Self(trimmed.to_ascii_lowercase())
    }

    /// Extracts the extension of `path`, if it has a non-empty one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Extension {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Extension {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Extension {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Extension> for String {
    fn from(value: Extension) -> Self {
        value.0
    }
}

impl AsRef<str> for Extension {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extension_normalization() {
        assert_eq!(Extension::new(".JPG").as_str(), "jpg");
        assert_eq!(Extension::new("Heic").as_str(), "heic");
        assert_eq!(Extension::new(" png ").as_str(), "png");
    }

    #[test]
    fn test_extension_from_path() {
        let ext = Extension::from_path(&PathBuf::from("/photos/IMG_0001.HEIC"));
        assert_eq!(ext, Some(Extension::new("heic")));

        assert_eq!(Extension::from_path(&PathBuf::from("/photos/README")), None);
        assert_eq!(Extension::from_path(&PathBuf::from("/photos/.hidden")), None);
    }

    #[test]
    fn test_extension_serde_normalizes() {
        let ext: Extension = serde_json::from_str("\"MP3\"").unwrap();
        assert_eq!(ext.as_str(), "mp3");
        assert_eq!(serde_json::to_string(&ext).unwrap(), "\"mp3\"");
    }

    #[test]
    fn test_media_type_display() {
        assert_eq!(MediaType::Image.to_string(), "image");
        assert_eq!(MediaType::Document.to_string(), "document");
    }
}
