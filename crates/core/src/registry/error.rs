//! Error types for the registry module.

use thiserror::Error;

use crate::media::{Extension, MediaError, MediaType};

use super::types::ConverterKind;

/// Errors raised when registering or resolving conversion routes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A route for this pair is already registered.
    #[error("Duplicate conversion route: {source_format} → {target_format}")]
    DuplicateRoute {
        source_format: Extension,
        target_format: Extension,
    },

    /// Source and target belong to different media domains.
    #[error(
        "Cross-domain conversion not supported: {source_format} ({source_type}) → {target_format} ({target_type})"
    )]
    CrossDomainRoute {
        source_format: Extension,
        source_type: MediaType,
        target_format: Extension,
        target_type: MediaType,
    },

    /// The route's converter does not handle the route's media type.
    #[error("{kind} cannot serve {media_type} route {source_format} → {target_format}")]
    ConverterMismatch {
        source_format: Extension,
        target_format: Extension,
        kind: ConverterKind,
        media_type: MediaType,
    },

    /// No route is registered for this pair.
    #[error("No conversion route registered for: {source_format} → {target_format}")]
    NoRouteFound {
        source_format: Extension,
        target_format: Extension,
    },

    /// One side of the route is not a known extension.
    #[error(transparent)]
    UnknownExtension(#[from] MediaError),
}

impl RegistryError {
    /// Creates a no-route error for the given pair.
    pub fn no_route(source_format: impl Into<Extension>, target_format: impl Into<Extension>) -> Self {
        Self::NoRouteFound {
            source_format: source_format.into(),
            target_format: target_format.into(),
        }
    }
}
