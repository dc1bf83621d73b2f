//! Entitlement types
//!
//! Core types used by the entitlement resolution system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration mode carried by an authority layer
///
/// The organization layer may hold any of the four variants. The system
/// default is expected to hold only `Use` or `Unuse`; the other variants are
/// tolerated there as degenerate input and resolve through the same rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigMode {
    /// Explicitly disabled at this layer
    Unuse,
    /// Explicitly enabled at this layer
    Use,
    /// The organization defers the decision to each employee
    DelegateToEmployee,
    /// No choice recorded at this layer; fall through to the next authority
    #[default]
    Undefined,
}

impl ConfigMode {
    /// Get the mode name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigMode::Unuse => "unuse",
            ConfigMode::Use => "use",
            ConfigMode::DelegateToEmployee => "delegate_to_employee",
            ConfigMode::Undefined => "undefined",
        }
    }

    /// Whether this layer made any choice at all
    pub const fn is_settled(&self) -> bool {
        !matches!(self, ConfigMode::Undefined)
    }

    /// The ruling this mode contributes to the authority chain, if any
    ///
    /// `Undefined` yields `None`, which makes resolution a "first `Some`
    /// wins" scan over the ordered authorities.
    pub const fn ruling(self) -> Option<LayerRuling> {
        match self {
            ConfigMode::Unuse => Some(LayerRuling::Forced(false)),
            ConfigMode::Use => Some(LayerRuling::Forced(true)),
            ConfigMode::DelegateToEmployee => Some(LayerRuling::Delegated),
            ConfigMode::Undefined => None,
        }
    }

    /// Get all modes
    pub fn all() -> &'static [ConfigMode] {
        &[
            ConfigMode::Unuse,
            ConfigMode::Use,
            ConfigMode::DelegateToEmployee,
            ConfigMode::Undefined,
        ]
    }
}

impl fmt::Display for ConfigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a single authority layer rules, when it rules anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRuling {
    /// A binding enable (`true`) or disable (`false`); no lower authority
    /// or employee choice can override it
    Forced(bool),
    /// The decision is handed to the employee's own choice
    Delegated,
}

/// The authority layers, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityLayer {
    Organization,
    SystemDefault,
}

impl AuthorityLayer {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthorityLayer::Organization => "organization",
            AuthorityLayer::SystemDefault => "system_default",
        }
    }
}

impl fmt::Display for AuthorityLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An individual employee's recorded choice
///
/// Employees can only opt in or out; the sentinel and delegation modes do not
/// exist at this layer. "No choice recorded" is `Option::None` on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeChoice {
    /// The employee opted in
    Use,
    /// The employee opted out
    Unuse,
}

impl EmployeeChoice {
    /// Whether this choice opts in to the service
    pub const fn opts_in(&self) -> bool {
        matches!(self, EmployeeChoice::Use)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            EmployeeChoice::Use => "use",
            EmployeeChoice::Unuse => "unuse",
        }
    }
}

impl fmt::Display for EmployeeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One usage decision's inputs, snapshotted
///
/// Bundles the organization mode, the system default in force when the
/// request was built, and the employee's recorded choice (if any).
/// Constructed fresh per decision; resolution never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUsageRequest {
    /// Organization-level mode for the service
    pub org_mode: ConfigMode,
    /// System-wide default, consulted only when the organization is undefined
    pub system_default: ConfigMode,
    /// The employee's own choice, consulted only under delegation
    pub employee_choice: Option<EmployeeChoice>,
}

impl ServiceUsageRequest {
    pub fn builder() -> ServiceUsageRequestBuilder {
        ServiceUsageRequestBuilder::default()
    }
}

/// Builder for [`ServiceUsageRequest`]
///
/// Callers that load the employee record as separate "exists" and "value"
/// columns can pass them through [`employee_record`](Self::employee_record);
/// the value is discarded when the record does not exist, so a stale value
/// column can never leak into resolution.
#[derive(Debug, Clone, Default)]
pub struct ServiceUsageRequestBuilder {
    org_mode: ConfigMode,
    system_default: ConfigMode,
    employee_choice: Option<EmployeeChoice>,
}

impl ServiceUsageRequestBuilder {
    pub fn org_mode(mut self, mode: ConfigMode) -> Self {
        self.org_mode = mode;
        self
    }

    pub fn system_default(mut self, mode: ConfigMode) -> Self {
        self.system_default = mode;
        self
    }

    pub fn employee_choice(mut self, choice: Option<EmployeeChoice>) -> Self {
        self.employee_choice = choice;
        self
    }

    /// Set the employee layer from an exists/value column pair
    pub fn employee_record(mut self, exists: bool, value: EmployeeChoice) -> Self {
        self.employee_choice = exists.then_some(value);
        self
    }

    pub fn build(self) -> ServiceUsageRequest {
        ServiceUsageRequest {
            org_mode: self.org_mode,
            system_default: self.system_default,
            employee_choice: self.employee_choice,
        }
    }
}
