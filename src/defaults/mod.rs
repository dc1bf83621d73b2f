//! System defaults module
//!
//! Provides the system-wide default mode consumed by the entitlement
//! resolvers when no organization-level choice exists. Currently backed by
//! static values and loaded configuration; the trait seam leaves room for a
//! directory- or database-backed source.

pub mod source;

pub use source::{BoxedDefaultSource, StaticDefault, SystemDefaultSource};

use crate::config::AppConfig;

/// Create a default source from configuration
pub fn create_default_source(config: &AppConfig) -> BoxedDefaultSource {
    Box::new(StaticDefault::new(config.defaults.mode))
}
