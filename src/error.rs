//! Error types for servicegate
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors that are part of the API.
//!
//! Note that entitlement resolution itself is total: every combination of
//! configuration modes produces a decision, never an error. The only fallible
//! boundary is configuration loading; [`EntitlementDeniedError`] is the
//! `Result` projection of a denied decision, not a resolution failure.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Entitlement denied: {0}")]
    EntitlementDenied(#[from] EntitlementDeniedError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Entitlement errors
#[derive(Error, Debug)]
#[error("Service '{service}' is not available: {reason}")]
pub struct EntitlementDeniedError {
    pub service: String,
    pub reason: String,
}

impl EntitlementDeniedError {
    pub fn new(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn org_disabled(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            reason: "disabled by a binding organization setting".into(),
        }
    }

    pub fn employee_opted_out(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            reason: "the employee has opted out".into(),
        }
    }

    pub fn no_employee_choice(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            reason: "delegated to the employee, but no employee choice is recorded".into(),
        }
    }

    pub fn unconfigured(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            reason: "no authority layer has a configured value".into(),
        }
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entitlement_denied_constructors() {
        let err = EntitlementDeniedError::org_disabled("timesheet-export");
        assert!(err.reason.contains("organization"));

        let err = EntitlementDeniedError::employee_opted_out("timesheet-export");
        assert!(err.reason.contains("opted out"));

        let err = EntitlementDeniedError::no_employee_choice("timesheet-export");
        assert!(err.reason.contains("no employee choice"));

        let err = EntitlementDeniedError::unconfigured("timesheet-export");
        assert!(err.reason.contains("no authority"));
    }

    #[test]
    fn test_entitlement_denied_display() {
        let err = EntitlementDeniedError::new("payroll", "disabled by a binding setting");
        let msg = err.to_string();
        assert!(msg.contains("payroll"));
        assert!(msg.contains("disabled"));
    }
}
