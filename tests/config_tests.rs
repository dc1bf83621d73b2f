//! Configuration loading integration tests

use servicegate::config::{LogFormat, load_config, load_config_from_str};
use servicegate::entitlement::ConfigMode;

#[test]
fn test_full_config_from_str() {
    let config_str = r#"
[service]
name = "timesheet-export"

[defaults]
mode = "delegate_to_employee"

[logging]
level = "debug"
format = "json"
"#;

    let config = load_config_from_str(config_str).unwrap();
    assert_eq!(config.service.name, "timesheet-export");
    assert_eq!(config.defaults.mode, ConfigMode::DelegateToEmployee);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config_str = r#"
[service]
name = "payroll"
"#;

    let config = load_config_from_str(config_str).unwrap();
    assert_eq!(config.service.name, "payroll");
    // Closed by default
    assert_eq!(config.defaults.mode, ConfigMode::Unuse);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_degenerate_default_mode_is_tolerated() {
    // An undefined system default is an operator mistake, but loading must
    // not fail on it; resolution stays total.
    let config_str = r#"
[defaults]
mode = "undefined"
"#;

    let config = load_config_from_str(config_str).unwrap();
    assert_eq!(config.defaults.mode, ConfigMode::Undefined);
}

#[test]
fn test_invalid_mode_rejected() {
    let config_str = r#"
[defaults]
mode = "enabled"
"#;

    assert!(load_config_from_str(config_str).is_err());
}

#[test]
#[serial_test::serial]
fn test_config_file_loading() {
    use std::fs;
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("servicegate.toml");
    let config_content = r#"
[service]
name = "timesheet-export"

[defaults]
mode = "use"
"#;
    fs::write(&config_path, config_content).unwrap();

    let config = load_config(Some(config_path.to_str().unwrap())).unwrap();
    assert_eq!(config.service.name, "timesheet-export");
    assert_eq!(config.defaults.mode, ConfigMode::Use);
}

#[test]
#[serial_test::serial]
fn test_env_override_beats_file() {
    use std::env;
    use std::fs;
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("servicegate.toml");
    let config_content = r#"
[defaults]
mode = "unuse"
"#;
    fs::write(&config_path, config_content).unwrap();

    unsafe {
        env::set_var("SERVICEGATE_DEFAULTS__MODE", "use");
    }

    let config = load_config(Some(config_path.to_str().unwrap())).unwrap();

    unsafe {
        env::remove_var("SERVICEGATE_DEFAULTS__MODE");
    }

    assert_eq!(config.defaults.mode, ConfigMode::Use);
}

#[test]
#[serial_test::serial]
fn test_env_sets_service_name() {
    use std::env;

    unsafe {
        env::set_var("SERVICEGATE_SERVICE__NAME", "env-service");
    }

    let config = load_config(None).unwrap();

    unsafe {
        env::remove_var("SERVICEGATE_SERVICE__NAME");
    }

    assert_eq!(config.service.name, "env-service");
}

#[test]
fn test_resolver_from_config() {
    use servicegate::entitlement::EntitlementResolver;

    let config = load_config_from_str(
        r#"
[service]
name = "timesheet-export"

[defaults]
mode = "use"
"#,
    )
    .unwrap();

    let resolver = EntitlementResolver::from_config(&config);
    assert_eq!(resolver.service(), "timesheet-export");
    // Undefined org falls back to the configured "use" default
    assert!(
        resolver
            .resolve_usage(ConfigMode::Undefined, None)
            .is_granted()
    );
}
