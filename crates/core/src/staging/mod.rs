//! Staging area for files awaiting conversion.
//!
//! Files are validated as they are added: the extension must be known and
//! every staged file must belong to the same [`MediaType`]. Two files whose
//! outputs would land on the same path are refused as well, since the second
//! conversion would overwrite the first. A rejected file never enters the
//! list and never disturbs what is already staged.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::media::{self, Extension, MediaError, MediaType};

/// A file accepted for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub extension: Extension,
    pub media_type: MediaType,
}

impl StagedFile {
    /// Validates and classifies `path` on its own.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StagingError> {
        let path = path.into();
        let extension =
            Extension::from_path(&path).ok_or_else(|| StagingError::MissingExtension {
                path: path.clone(),
            })?;
        let media_type = media::classify(&extension).map_err(|e| match e {
            MediaError::UnknownExtension(ext) => StagingError::UnknownExtension {
                path: path.clone(),
                extension: ext,
            },
        })?;

        Ok(Self {
            path,
            extension,
            media_type,
        })
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Reasons a file is refused by the staging area.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StagingError {
    #[error("File has no extension: {path}")]
    MissingExtension { path: PathBuf },

    #[error("Unsupported file type .{extension}: {path}")]
    UnknownExtension { path: PathBuf, extension: String },

    #[error("Cannot mix {found} files into a batch of {expected} files: {path}")]
    MixedMediaType {
        path: PathBuf,
        expected: MediaType,
        found: MediaType,
    },

    #[error("File already staged: {path}")]
    AlreadyStaged { path: PathBuf },

    #[error("Output of {path} would overwrite output of {existing}")]
    OutputCollision { path: PathBuf, existing: PathBuf },
}

/// Ordered, single-domain list of files to convert.
#[derive(Debug, Clone, Default)]
pub struct StagingArea {
    files: Vec<StagedFile>,
    output_dir: Option<PathBuf>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outputs are written flat into `output_dir` when set, so stems must be
    /// unique across the whole batch rather than per source directory.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Validates and appends `path`.
    pub fn stage(&mut self, path: impl Into<PathBuf>) -> Result<&StagedFile, StagingError> {
        let file = StagedFile::new(path)?;

        if let Some(expected) = self.media_type() {
            if file.media_type != expected {
                return Err(StagingError::MixedMediaType {
                    path: file.path,
                    expected,
                    found: file.media_type,
                });
            }
        }

        if self.contains(&file.path) {
            return Err(StagingError::AlreadyStaged { path: file.path });
        }

        if let Some(existing) = self.files.iter().find(|f| self.shares_output(f, &file.path)) {
            return Err(StagingError::OutputCollision {
                existing: existing.path.clone(),
                path: file.path,
            });
        }

        debug!("Staged {} as {}", file.path.display(), file.media_type);
        self.files.push(file);
        Ok(&self.files[self.files.len() - 1])
    }

    // Outputs are named `<stem>.<target>`, and the target is shared by the batch
    fn shares_output(&self, staged: &StagedFile, path: &Path) -> bool {
        staged.path.file_stem() == path.file_stem()
            && (self.output_dir.is_some() || staged.path.parent() == path.parent())
    }

    /// Removes `path` if staged. Returns whether anything was removed.
    pub fn unstage(&mut self, path: &Path) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.path != path);
        before != self.files.len()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    /// Media type shared by the staged files, or `None` when empty.
    pub fn media_type(&self) -> Option<MediaType> {
        self.files.first().map(|f| f.media_type)
    }

    /// Distinct source extensions, in staging order.
    pub fn extensions(&self) -> Vec<Extension> {
        let mut seen = Vec::new();
        for file in &self.files {
            if !seen.contains(&file.extension) {
                seen.push(file.extension.clone());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Hands the staged list over, typically to a worker.
    pub fn into_files(self) -> Vec<StagedFile> {
        self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_classifies_file() {
        let mut staging = StagingArea::new();
        let staged = staging.stage("/photos/IMG_0001.HEIC").unwrap();
        assert_eq!(staged.extension.as_str(), "heic");
        assert_eq!(staged.media_type, MediaType::Image);
        assert_eq!(staged.display_name(), "IMG_0001.HEIC");
        assert_eq!(staging.media_type(), Some(MediaType::Image));
    }

    #[test]
    fn test_stage_rejects_mixed_domain() {
        let mut staging = StagingArea::new();
        staging.stage("/a/photo.png").unwrap();

        let err = staging.stage("/a/clip.mp4").unwrap_err();
        assert_eq!(
            err,
            StagingError::MixedMediaType {
                path: PathBuf::from("/a/clip.mp4"),
                expected: MediaType::Image,
                found: MediaType::Video,
            }
        );
        assert_eq!(staging.len(), 1);
        assert_eq!(staging.files()[0].path, PathBuf::from("/a/photo.png"));
    }

    #[test]
    fn test_stage_rejects_unknown_and_missing_extension() {
        let mut staging = StagingArea::new();
        assert!(matches!(
            staging.stage("/a/archive.xyz"),
            Err(StagingError::UnknownExtension { .. })
        ));
        assert!(matches!(
            staging.stage("/a/Makefile"),
            Err(StagingError::MissingExtension { .. })
        ));
        assert!(staging.is_empty());
        assert_eq!(staging.media_type(), None);
    }

    #[test]
    fn test_stage_rejects_duplicates() {
        let mut staging = StagingArea::new();
        staging.stage("/a/song.wav").unwrap();
        assert!(matches!(
            staging.stage("/a/song.wav"),
            Err(StagingError::AlreadyStaged { .. })
        ));
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn test_stage_rejects_same_stem_in_same_directory() {
        let mut staging = StagingArea::new();
        staging.stage("/a/photo.png").unwrap();

        let err = staging.stage("/a/photo.bmp").unwrap_err();
        assert_eq!(
            err,
            StagingError::OutputCollision {
                path: PathBuf::from("/a/photo.bmp"),
                existing: PathBuf::from("/a/photo.png"),
            }
        );
        assert_eq!(staging.len(), 1);

        // Freed once the first file is unstaged
        assert!(staging.unstage(Path::new("/a/photo.png")));
        staging.stage("/a/photo.bmp").unwrap();
    }

    #[test]
    fn test_same_stem_across_directories_depends_on_output_dir() {
        let mut staging = StagingArea::new();
        staging.stage("/a/photo.png").unwrap();
        staging.stage("/b/photo.png").unwrap();
        assert_eq!(staging.len(), 2);

        let mut flat = StagingArea::new().with_output_dir(Some(PathBuf::from("/out")));
        flat.stage("/a/photo.png").unwrap();
        assert!(matches!(
            flat.stage("/b/photo.png"),
            Err(StagingError::OutputCollision { .. })
        ));
        flat.stage("/b/other.png").unwrap();

        // The output directory survives clearing
        flat.clear();
        flat.stage("/a/photo.png").unwrap();
        assert!(matches!(
            flat.stage("/c/photo.gif"),
            Err(StagingError::OutputCollision { .. })
        ));
    }

    #[test]
    fn test_unstage_and_clear() {
        let mut staging = StagingArea::new();
        staging.stage("/a/one.png").unwrap();
        staging.stage("/a/two.jpg").unwrap();

        assert!(staging.unstage(Path::new("/a/one.png")));
        assert!(!staging.unstage(Path::new("/a/one.png")));
        assert_eq!(staging.len(), 1);

        staging.clear();
        assert!(staging.is_empty());
        // Domain is free again once empty
        staging.stage("/a/clip.mkv").unwrap();
        assert_eq!(staging.media_type(), Some(MediaType::Video));
    }

    #[test]
    fn test_extensions_and_into_files_preserve_order() {
        let mut staging = StagingArea::new();
        staging.stage("/a/b.png").unwrap();
        staging.stage("/a/a.heic").unwrap();
        staging.stage("/a/c.png").unwrap();

        let exts: Vec<String> = staging.extensions().into_iter().map(String::from).collect();
        assert_eq!(exts, vec!["png", "heic"]);

        let names: Vec<String> = staging
            .into_files()
            .iter()
            .map(|f| f.display_name())
            .collect();
        assert_eq!(names, vec!["b.png", "a.heic", "c.png"]);
    }
}
