//! Entitlement resolver
//!
//! Implements layered entitlement resolution with the following precedence
//! (highest to lowest):
//! 1. Organization config (binding `use`/`unuse`, or delegation)
//! 2. System default (only consulted when the organization is undefined)
//! 3. Employee choice (only consulted when the effective mode delegates)
//!
//! Resolution stops at the first authority with a settled value. Delegation
//! is a conditional grant, not an enablement: it still requires an affirmative
//! employee opt-in, and an absent employee record resolves to denied. An
//! exhausted chain (every layer undefined) also resolves to denied; no input
//! combination produces an error.

use crate::config::AppConfig;
use crate::defaults::{BoxedDefaultSource, SystemDefaultSource, create_default_source};
use crate::entitlement::types::{
    AuthorityLayer, ConfigMode, EmployeeChoice, LayerRuling, ServiceUsageRequest,
};
use crate::error::EntitlementDeniedError;
use tracing::{debug, trace, warn};

/// Result of a usage check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageDecision {
    /// The employee may use the service
    Granted,
    /// The employee may not use the service, with a reason
    Denied(String),
}

impl UsageDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, UsageDecision::Granted)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, UsageDecision::Denied(_))
    }
}

/// Walk the authority chain and return the first settled ruling
///
/// The chain is ordered [organization, system default]; `None` means every
/// layer was undefined.
fn chain_ruling(
    org_mode: ConfigMode,
    system_default: ConfigMode,
) -> Option<(AuthorityLayer, LayerRuling)> {
    org_mode
        .ruling()
        .map(|r| (AuthorityLayer::Organization, r))
        .or_else(|| {
            system_default
                .ruling()
                .map(|r| (AuthorityLayer::SystemDefault, r))
        })
}

/// Resolve a usage request to a decision
///
/// Pure decision table over the request; performs no external reads. The
/// system default snapshot in the request stands in for the organization mode
/// when the latter is undefined, re-applying the same rules one level down.
pub fn resolve_usage(request: &ServiceUsageRequest) -> UsageDecision {
    match chain_ruling(request.org_mode, request.system_default) {
        Some((layer, LayerRuling::Forced(true))) => {
            trace!(%layer, "binding enable");
            UsageDecision::Granted
        }
        Some((layer, LayerRuling::Forced(false))) => {
            trace!(%layer, "binding disable");
            UsageDecision::Denied(format!("disabled by a binding {} setting", layer))
        }
        Some((layer, LayerRuling::Delegated)) => match request.employee_choice {
            Some(choice) if choice.opts_in() => {
                trace!(%layer, "delegated, employee opted in");
                UsageDecision::Granted
            }
            Some(_) => {
                trace!(%layer, "delegated, employee opted out");
                UsageDecision::Denied("the employee has opted out".to_string())
            }
            None => {
                trace!(%layer, "delegated, no employee choice recorded");
                UsageDecision::Denied(
                    "delegated to the employee, but no employee choice is recorded".to_string(),
                )
            }
        },
        None => {
            // Every layer undefined is a misconfiguration; resolve closed
            // instead of erroring.
            warn!("no authority layer has a configured value");
            UsageDecision::Denied("no authority layer has a configured value".to_string())
        }
    }
}

/// Resolve a usage request to a boolean
pub fn can_use_service(request: &ServiceUsageRequest) -> bool {
    resolve_usage(request).is_granted()
}

/// Decide whether per-employee management of the setting is permitted
///
/// `true` only when the effective mode delegates: either the organization
/// delegates explicitly, or the organization is undefined and the system
/// default delegates. A binding `use`/`unuse` at either layer locks the
/// setting. The source is read at most once, and only on the undefined
/// branch.
pub fn can_manage_per_employee(org_mode: ConfigMode, defaults: &dyn SystemDefaultSource) -> bool {
    let ruling = org_mode.ruling().or_else(|| {
        let fallback = defaults.default_mode();
        trace!(%fallback, "organization undefined, consulting system default");
        if !fallback.is_settled() {
            warn!("system default reports undefined; treating as locked");
        }
        fallback.ruling()
    });
    matches!(ruling, Some(LayerRuling::Delegated))
}

/// Entitlement resolver for a single service
///
/// Owns the system-default source and carries the service name for logging
/// and error context. Safe to share across threads: resolution is pure apart
/// from at most one concurrent-safe read of the source per call.
pub struct EntitlementResolver {
    service: String,
    defaults: BoxedDefaultSource,
}

impl EntitlementResolver {
    /// Create a resolver for a named service
    pub fn new(service: impl Into<String>, defaults: BoxedDefaultSource) -> Self {
        Self {
            service: service.into(),
            defaults,
        }
    }

    /// Create a resolver from loaded configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            service: config.service.name.clone(),
            defaults: create_default_source(config),
        }
    }

    /// The service this resolver decides for
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Whether employees may manage the setting individually
    pub fn can_manage_per_employee(&self, org_mode: ConfigMode) -> bool {
        debug!(
            service = %self.service,
            %org_mode,
            source = self.defaults.source_kind(),
            "Resolving per-employee delegation"
        );
        can_manage_per_employee(org_mode, self.defaults.as_ref())
    }

    /// Check a pre-built usage request
    ///
    /// The request already carries a system-default snapshot, so this never
    /// touches the source.
    pub fn check_usage(&self, request: &ServiceUsageRequest) -> UsageDecision {
        debug!(
            service = %self.service,
            org_mode = %request.org_mode,
            system_default = %request.system_default,
            employee_choice = ?request.employee_choice,
            "Checking usage"
        );
        resolve_usage(request)
    }

    /// Snapshot the system default and resolve in one call
    pub fn resolve_usage(
        &self,
        org_mode: ConfigMode,
        employee_choice: Option<EmployeeChoice>,
    ) -> UsageDecision {
        let request = ServiceUsageRequest {
            org_mode,
            system_default: self.defaults.default_mode(),
            employee_choice,
        };
        self.check_usage(&request)
    }

    /// Check a usage request, returning an error if denied
    pub fn require_usage(
        &self,
        request: &ServiceUsageRequest,
    ) -> Result<(), EntitlementDeniedError> {
        match self.check_usage(request) {
            UsageDecision::Granted => Ok(()),
            UsageDecision::Denied(reason) => {
                Err(EntitlementDeniedError::new(&self.service, reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::StaticDefault;

    fn resolver_with_default(mode: ConfigMode) -> EntitlementResolver {
        EntitlementResolver::new("timesheet-export", Box::new(StaticDefault::new(mode)))
    }

    fn request(
        org_mode: ConfigMode,
        system_default: ConfigMode,
        employee_choice: Option<EmployeeChoice>,
    ) -> ServiceUsageRequest {
        ServiceUsageRequest {
            org_mode,
            system_default,
            employee_choice,
        }
    }

    #[test]
    fn test_org_unuse_is_absolute() {
        // Employee opted in and the default enables, but the org disable wins
        let decision = resolve_usage(&request(
            ConfigMode::Unuse,
            ConfigMode::Use,
            Some(EmployeeChoice::Use),
        ));
        assert!(decision.is_denied());
    }

    #[test]
    fn test_org_use_is_absolute() {
        let decision = resolve_usage(&request(
            ConfigMode::Use,
            ConfigMode::Unuse,
            Some(EmployeeChoice::Unuse),
        ));
        assert!(decision.is_granted());
    }

    #[test]
    fn test_delegation_requires_opt_in() {
        let delegated = |choice| {
            resolve_usage(&request(
                ConfigMode::DelegateToEmployee,
                ConfigMode::Use,
                choice,
            ))
        };

        assert!(delegated(Some(EmployeeChoice::Use)).is_granted());
        assert!(delegated(Some(EmployeeChoice::Unuse)).is_denied());
        // Silence is denial, even with an enabling system default
        assert!(delegated(None).is_denied());
    }

    #[test]
    fn test_undefined_org_falls_back_to_default() {
        let decision = resolve_usage(&request(ConfigMode::Undefined, ConfigMode::Use, None));
        assert!(decision.is_granted());

        let decision = resolve_usage(&request(
            ConfigMode::Undefined,
            ConfigMode::Unuse,
            Some(EmployeeChoice::Use),
        ));
        assert!(decision.is_denied());
    }

    #[test]
    fn test_delegating_default_consults_employee() {
        // Degenerate but tolerated: the default itself delegates
        let delegated = |choice| {
            resolve_usage(&request(
                ConfigMode::Undefined,
                ConfigMode::DelegateToEmployee,
                choice,
            ))
        };

        assert!(delegated(Some(EmployeeChoice::Use)).is_granted());
        assert!(delegated(None).is_denied());
    }

    #[test]
    fn test_exhausted_chain_resolves_closed() {
        let decision = resolve_usage(&request(
            ConfigMode::Undefined,
            ConfigMode::Undefined,
            Some(EmployeeChoice::Use),
        ));
        assert!(decision.is_denied());
    }

    #[test]
    fn test_delegation_resolution() {
        let resolver = resolver_with_default(ConfigMode::Use);

        assert!(resolver.can_manage_per_employee(ConfigMode::DelegateToEmployee));
        assert!(!resolver.can_manage_per_employee(ConfigMode::Use));
        assert!(!resolver.can_manage_per_employee(ConfigMode::Unuse));
        // Undefined falls back to the binding default
        assert!(!resolver.can_manage_per_employee(ConfigMode::Undefined));
    }

    #[test]
    fn test_delegation_from_default() {
        let resolver = resolver_with_default(ConfigMode::DelegateToEmployee);
        assert!(resolver.can_manage_per_employee(ConfigMode::Undefined));
        // An explicit org choice still locks the setting
        assert!(!resolver.can_manage_per_employee(ConfigMode::Use));
    }

    #[test]
    fn test_delegation_with_undefined_default() {
        let resolver = resolver_with_default(ConfigMode::Undefined);
        assert!(!resolver.can_manage_per_employee(ConfigMode::Undefined));
    }

    #[test]
    fn test_require_usage_carries_service_name() {
        let resolver = resolver_with_default(ConfigMode::Unuse);
        let err = resolver
            .require_usage(&request(ConfigMode::Unuse, ConfigMode::Unuse, None))
            .unwrap_err();
        assert_eq!(err.service, "timesheet-export");
        assert!(err.reason.contains("organization"));
    }

    #[test]
    fn test_resolve_usage_snapshots_default() {
        let resolver = resolver_with_default(ConfigMode::Use);
        assert!(resolver.resolve_usage(ConfigMode::Undefined, None).is_granted());

        let resolver = resolver_with_default(ConfigMode::Unuse);
        assert!(resolver.resolve_usage(ConfigMode::Undefined, None).is_denied());
    }
}
