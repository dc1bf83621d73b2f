//! Layered service entitlement resolution
//!
//! Decides whether an employee may use a feature/service by combining three
//! layered configuration signals with a fixed precedence.
//!
//! ## Authority Model
//!
//! ```text
//! organization config → system default → (employee choice, when delegated)
//! ```
//!
//! Each authority layer carries a [`ConfigMode`]:
//! - `use` / `unuse` - a binding enable/disable, ends resolution
//! - `delegate_to_employee` - hands the decision to the employee's own choice
//! - `undefined` - no choice at this layer, fall through to the next one
//!
//! Resolution walks the chain and stops at the first layer with a non-sentinel
//! value. Delegation still requires an affirmative employee choice: an absent
//! or opted-out employee record resolves to "denied". An exhausted chain also
//! resolves to "denied" rather than erroring.
//!
//! ## Example Configuration
//!
//! ```toml
//! [service]
//! name = "timesheet-export"
//!
//! [defaults]
//! mode = "unuse"              # System-wide fallback: disabled
//!
//! [logging]
//! level = "info"
//! ```

pub mod config;
pub mod defaults;
pub mod entitlement;
pub mod error;
pub mod logging;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use defaults::{BoxedDefaultSource, StaticDefault, SystemDefaultSource};
pub use entitlement::{
    ConfigMode, EmployeeChoice, EntitlementResolver, ServiceUsageRequest, UsageDecision,
};
pub use error::{AppError, Result};
