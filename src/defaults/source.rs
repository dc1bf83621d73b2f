//! System default source trait
//!
//! Defines the one capability the resolution core consumes from its
//! environment: a read of the system-wide default mode.

use crate::entitlement::ConfigMode;

/// System default source trait
///
/// Implementations expose the system-wide default [`ConfigMode`] consulted
/// when no organization-level choice exists. The read must be idempotent and
/// side-effect-free from the resolver's perspective, and safe for concurrent
/// use; the core reads it at most once per resolution and never writes.
///
/// Any value the source returns is treated as valid input, including the
/// degenerate `undefined`; the resolvers never raise on it.
pub trait SystemDefaultSource: Send + Sync {
    /// Get the current system-wide default mode
    fn default_mode(&self) -> ConfigMode;

    /// Get a description of the source (for logging)
    fn source_kind(&self) -> &'static str;
}

/// A fixed system default
///
/// The normal production shape: the operator configures one binding
/// `use`/`unuse` value and it never changes at runtime.
#[derive(Debug, Clone, Copy)]
pub struct StaticDefault {
    mode: ConfigMode,
}

impl StaticDefault {
    pub fn new(mode: ConfigMode) -> Self {
        Self { mode }
    }
}

impl From<ConfigMode> for StaticDefault {
    fn from(mode: ConfigMode) -> Self {
        Self::new(mode)
    }
}

impl SystemDefaultSource for StaticDefault {
    fn default_mode(&self) -> ConfigMode {
        self.mode
    }

    fn source_kind(&self) -> &'static str {
        "static"
    }
}

/// Box type alias for default sources
pub type BoxedDefaultSource = Box<dyn SystemDefaultSource>;
