//! Configuration types for servicegate
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::entitlement::ConfigMode;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The gated service
    pub service: ServiceConfig,

    /// System-wide defaults
    pub defaults: DefaultsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            defaults: DefaultsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// The service whose entitlement is resolved
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name, used for logging and denial messages
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "service".to_string(),
        }
    }
}

/// System-wide default configuration
///
/// The fallback authority when no organization-level choice exists. Expected
/// to be a binding `use`/`unuse`; `delegate_to_employee` and `undefined` are
/// tolerated as degenerate values and only produce a warning at load time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default mode for the service
    pub mode: ConfigMode,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        // Default closed: absent configuration disables the service
        Self {
            mode: ConfigMode::Unuse,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
