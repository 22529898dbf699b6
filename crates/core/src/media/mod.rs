//! Media type classification.
//!
//! Every file the converter touches is first reduced to an [`Extension`] and
//! then classified into a coarse [`MediaType`] using a static table. The
//! classification is what keeps a staged batch single-domain and what the
//! registry uses to refuse cross-domain routes.

mod classifier;
mod types;

pub use classifier::{classify, known_extensions, same_domain};
pub use types::{Extension, MediaType};

use thiserror::Error;

/// Errors raised while classifying an extension.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaError {
    /// The extension is not present in the static table.
    #[error("Unknown file extension: .{0}")]
    UnknownExtension(String),
}
