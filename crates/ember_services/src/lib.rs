//! Ember Services Layer
//!
//! Platform abstraction for configuration and locale lookups. The render
//! layer has no structural dependency on this; it consumes plain strings.

pub mod registry;

pub use registry::{
    language_from_locale, system_language, Registry, RegistryError, RegistryRoot,
};
