//! Static extension table and classification functions.

use super::types::{Extension, MediaType};
use super::MediaError;

/// Every known extension and the domain it belongs to.
const EXTENSION_TABLE: &[(&str, MediaType)] = &[
    // Images
    ("heic", MediaType::Image),
    ("jpg", MediaType::Image),
    ("jpeg", MediaType::Image),
    ("png", MediaType::Image),
    ("webp", MediaType::Image),
    ("gif", MediaType::Image),
    ("bmp", MediaType::Image),
    ("tiff", MediaType::Image),
    // Video
    ("mp4", MediaType::Video),
    ("avi", MediaType::Video),
    ("mkv", MediaType::Video),
    ("mov", MediaType::Video),
    ("wmv", MediaType::Video),
    ("flv", MediaType::Video),
    // Audio
    ("mp3", MediaType::Audio),
    ("wav", MediaType::Audio),
    ("flac", MediaType::Audio),
    ("aac", MediaType::Audio),
    ("ogg", MediaType::Audio),
    ("m4a", MediaType::Audio),
    // Documents
    ("pdf", MediaType::Document),
    ("docx", MediaType::Document),
    ("txt", MediaType::Document),
];

/// Classifies an extension into its media domain.
pub fn classify(extension: impl AsRef<str>) -> Result<MediaType, MediaError> {
    let ext = Extension::new(extension);
    EXTENSION_TABLE
        .iter()
        .find(|(known, _)| *known == ext.as_str())
        .map(|(_, media_type)| *media_type)
        .ok_or_else(|| MediaError::UnknownExtension(ext.to_string()))
}

/// Returns true iff every extension classifies to the same media type.
///
/// An empty set is trivially single-domain. Any unknown extension makes the
/// set not single-domain.
pub fn same_domain<I, S>(extensions: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut domain: Option<MediaType> = None;
    for ext in extensions {
        match (classify(ext), domain) {
            (Err(_), _) => return false,
            (Ok(found), Some(expected)) if found != expected => return false,
            (Ok(found), _) => domain = Some(found),
        }
    }
    true
}

/// Known extensions of one media type, in table order.
pub fn known_extensions(media_type: MediaType) -> impl Iterator<Item = Extension> {
    EXTENSION_TABLE
        .iter()
        .filter(move |(_, t)| *t == media_type)
        .map(|(ext, _)| Extension::new(ext))
}
