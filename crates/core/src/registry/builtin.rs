//! Built-in route table.

use crate::media::MediaType;

/// `(source, target, lossy)` routes shipped with the application, grouped by
/// media type.
pub const BUILTIN_ROUTES: &[(MediaType, &[(&str, &str, bool)])] = &[
    (
        MediaType::Image,
        &[
            ("heic", "jpg", true),
            ("heic", "png", false),
            ("jpg", "png", false),
            ("jpg", "webp", true),
            ("png", "jpg", true),
            ("png", "webp", false),
            ("png", "gif", false),
            ("webp", "jpg", true),
            ("webp", "png", false),
            ("gif", "png", false),
            ("bmp", "jpg", true),
            ("bmp", "png", false),
            ("tiff", "jpg", true),
            ("tiff", "png", false),
        ],
    ),
    (
        MediaType::Video,
        &[
            ("mp4", "avi", false),
            ("mp4", "mkv", false),
            ("mp4", "mov", false),
            ("avi", "mp4", false),
            ("avi", "mkv", false),
            ("mkv", "mp4", false),
            ("mkv", "avi", false),
            ("mov", "mp4", false),
            ("mov", "avi", false),
        ],
    ),
    (
        MediaType::Audio,
        &[
            ("mp3", "wav", false),
            ("mp3", "flac", false),
            ("wav", "mp3", true),
            ("wav", "flac", false),
            ("flac", "mp3", true),
            ("flac", "wav", false),
            ("aac", "mp3", true),
            ("aac", "wav", false),
            ("m4a", "mp3", true),
            ("m4a", "wav", false),
        ],
    ),
    (
        MediaType::Document,
        &[("pdf", "txt", false), ("docx", "txt", false)],
    ),
];
