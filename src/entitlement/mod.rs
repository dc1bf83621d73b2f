//! Entitlement module
//!
//! Decides whether an employee may use a service, and whether the setting is
//! open to per-employee management at all.
//!
//! ## Authority Model
//!
//! Resolution scans an ordered chain of authorities and stops at the first
//! one with a settled value:
//!
//! 1. **Organization config** - a binding `use`/`unuse` ends resolution;
//!    `delegate_to_employee` hands the decision to the employee layer
//! 2. **System default** - consulted only when the organization is undefined,
//!    then subject to the same rules
//! 3. **Employee choice** - consulted only under delegation; absence of a
//!    choice resolves to denied
//!
//! The sentinel `undefined` means "no decision here, fall through". It is
//! never a final answer: a chain where every layer is undefined resolves to
//! denied rather than erroring.
//!
//! ## Example Configuration
//!
//! ```toml
//! [service]
//! name = "timesheet-export"
//!
//! [defaults]
//! mode = "unuse"              # System-wide fallback when no org choice exists
//! ```

pub mod resolver;
pub mod types;

pub use resolver::{
    EntitlementResolver, UsageDecision, can_manage_per_employee, can_use_service, resolve_usage,
};
pub use types::{
    AuthorityLayer, ConfigMode, EmployeeChoice, LayerRuling, ServiceUsageRequest,
    ServiceUsageRequestBuilder,
};
