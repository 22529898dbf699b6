//! Conversion registry.
//!
//! The registry is the single source of truth for which conversions exist.
//! It is built once at startup (usually through
//! [`ConversionRegistry::with_defaults`]), wrapped in an `Arc` and shared
//! read-only with the staging area, the worker and the UI.
//!
//! # Example
//!
//! ```ignore
//! use fileconv_core::registry::ConversionRegistry;
//!
//! let registry = ConversionRegistry::with_defaults()?;
//! assert!(registry.is_valid("heic", "jpg"));
//!
//! let route = registry.get_route("wav", "mp3")?;
//! assert!(route.lossy);
//! ```

mod builtin;
mod error;
mod table;
mod types;

pub use builtin::BUILTIN_ROUTES;
pub use error::RegistryError;
pub use table::ConversionRegistry;
pub use types::{ConversionRoute, ConverterKind};
