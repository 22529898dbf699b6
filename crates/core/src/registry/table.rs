//! The conversion registry.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::media::{self, Extension, MediaError, MediaType};

use super::builtin::BUILTIN_ROUTES;
use super::error::RegistryError;
use super::types::{ConversionRoute, ConverterKind};

/// Holds every registered conversion route and answers routing queries.
///
/// Lookups are case-insensitive: every `&str` argument is normalized into an
/// [`Extension`] first.
#[derive(Debug, Clone, Default)]
pub struct ConversionRegistry {
    routes: HashMap<(Extension, Extension), ConversionRoute>,
}

impl ConversionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry populated with the built-in route table.
    ///
    /// An error here means the built-in table is inconsistent; callers are
    /// expected to refuse to start.
    pub fn with_defaults() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (media_type, routes) in BUILTIN_ROUTES {
            let kind = ConverterKind::for_media_type(*media_type);
            for (source, target, lossy) in routes.iter() {
                registry.register(ConversionRoute::new(*source, *target, kind, *lossy))?;
            }
        }
        debug!("Built default conversion registry with {} routes", registry.len());
        Ok(registry)
    }

    /// Registers a route.
    ///
    /// Re-registering an existing pair is rejected rather than overwritten.
    pub fn register(&mut self, route: ConversionRoute) -> Result<(), RegistryError> {
        let source_type = media::classify(&route.source_format)?;
        let target_type = media::classify(&route.target_format)?;

        if source_type != target_type {
            return Err(RegistryError::CrossDomainRoute {
                source_format: route.source_format,
                source_type,
                target_format: route.target_format,
                target_type,
            });
        }

        if route.converter.media_type() != source_type {
            return Err(RegistryError::ConverterMismatch {
                source_format: route.source_format,
                target_format: route.target_format,
                kind: route.converter,
                media_type: source_type,
            });
        }

        let key = route.key();
        if self.routes.contains_key(&key) {
            return Err(RegistryError::DuplicateRoute {
                source_format: key.0,
                target_format: key.1,
            });
        }

        self.routes.insert(key, route);
        Ok(())
    }

    /// Whether a route exists for exactly this pair.
    pub fn is_valid(&self, source_format: &str, target_format: &str) -> bool {
        self.routes
            .contains_key(&(Extension::new(source_format), Extension::new(target_format)))
    }

    /// Returns the route for this pair.
    pub fn get_route(
        &self,
        source_format: &str,
        target_format: &str,
    ) -> Result<&ConversionRoute, RegistryError> {
        let key = (Extension::new(source_format), Extension::new(target_format));
        self.routes
            .get(&key)
            .ok_or(RegistryError::NoRouteFound {
                source_format: key.0,
                target_format: key.1,
            })
    }

    /// All targets reachable from `source_format`, sorted. Empty when nothing
    /// is registered for it.
    pub fn valid_targets(&self, source_format: &str) -> BTreeSet<Extension> {
        let source = Extension::new(source_format);
        self.routes
            .keys()
            .filter(|(s, _)| *s == source)
            .map(|(_, t)| t.clone())
            .collect()
    }

    /// Union of the targets reachable from any of `sources`.
    pub fn valid_targets_for_all<'a, I>(&self, sources: I) -> BTreeSet<Extension>
    where
        I: IntoIterator<Item = &'a Extension>,
    {
        sources
            .into_iter()
            .flat_map(|source| self.valid_targets(source.as_str()))
            .collect()
    }

    /// Media type of an extension; delegates to the classifier.
    pub fn media_type(&self, extension: &str) -> Result<MediaType, MediaError> {
        media::classify(extension)
    }

    /// Iterates over all registered routes in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &ConversionRoute> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
