//! Tests for configuration validation

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use agent_dispatch::config::{DashboardConfig, DefaultAdminConfig, StoreBackendConfig};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config_is_valid() {
    let cfg = DashboardConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.store, StoreBackendConfig::InMemory);
    assert_eq!(cfg.session_ttl_secs, 8 * 60 * 60);
    assert_eq!(cfg.audit_capacity, 1024);
}

#[test]
fn test_file_store_requires_data_dir() {
    let cfg = DashboardConfig {
        store: StoreBackendConfig::File,
        ..DashboardConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = DashboardConfig {
        store: StoreBackendConfig::File,
        data_dir: Some(PathBuf::from("/tmp/dashboard")),
        ..DashboardConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_invalid_session_ttl() {
    let cfg = DashboardConfig {
        session_ttl_secs: 0,
        ..DashboardConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_iterations() {
    let cfg = DashboardConfig {
        pbkdf2_iterations: 0,
        ..DashboardConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_invalid_default_admin() {
    let cfg = DashboardConfig {
        default_admin: Some(DefaultAdminConfig {
            email: "admin@example.com".into(),
            name: "Admin User".into(),
            password: String::new(),
        }),
        ..DashboardConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.contains("default_admin"));
}

#[test]
fn test_from_json_str_applies_defaults() {
    let cfg = DashboardConfig::from_json_str(r#"{"store":"file","data_dir":"/var/lib/dash"}"#)
        .unwrap();
    assert_eq!(cfg.store, StoreBackendConfig::File);
    assert_eq!(cfg.data_dir, Some(PathBuf::from("/var/lib/dash")));
    assert_eq!(cfg.pbkdf2_iterations, 200_000);
    assert!(cfg.default_admin.is_none());
}

#[test]
fn test_from_json_str_rejects_invalid() {
    assert!(DashboardConfig::from_json_str(r#"{"store":"file"}"#).is_err());
    assert!(DashboardConfig::from_json_str(r#"{"store":"redis"}"#).is_err());
    assert!(DashboardConfig::from_json_str("not json").is_err());
}

#[test]
fn test_from_lookup() {
    let cfg = DashboardConfig::from_lookup(lookup(&[
        ("DASHBOARD_STORE", "file"),
        ("DASHBOARD_DATA_DIR", "/data"),
        ("DASHBOARD_SESSION_TTL_SECS", "120"),
        ("DASHBOARD_PBKDF2_ITERATIONS", " 5000 "),
        ("DASHBOARD_AUDIT_CAPACITY", "0"),
        ("DASHBOARD_ADMIN_EMAIL", "admin@example.com"),
        ("DASHBOARD_ADMIN_PASSWORD", "admin123"),
    ]))
    .unwrap();
    assert_eq!(cfg.store, StoreBackendConfig::File);
    assert_eq!(cfg.data_dir, Some(PathBuf::from("/data")));
    assert_eq!(cfg.session_ttl_secs, 120);
    assert_eq!(cfg.pbkdf2_iterations, 5000);
    assert_eq!(cfg.audit_capacity, 0);
    let admin = cfg.default_admin.unwrap();
    assert_eq!(admin.name, "Admin User");
    assert_eq!(admin.password, "admin123");
}

#[test]
fn test_from_lookup_rejects_bad_values() {
    assert!(DashboardConfig::from_lookup(lookup(&[("DASHBOARD_STORE", "redis")])).is_err());
    assert!(
        DashboardConfig::from_lookup(lookup(&[("DASHBOARD_SESSION_TTL_SECS", "soon")])).is_err()
    );
    // Admin email without a password fails validation.
    assert!(
        DashboardConfig::from_lookup(lookup(&[("DASHBOARD_ADMIN_EMAIL", "admin@example.com")]))
            .is_err()
    );
}

#[test]
fn test_service_settings() {
    let cfg = DashboardConfig {
        session_ttl_secs: 90,
        pbkdf2_iterations: 10,
        ..DashboardConfig::default()
    };
    let settings = cfg.service_settings();
    assert_eq!(settings.session_ttl, Duration::from_secs(90));
    assert_eq!(settings.pbkdf2_iterations, 10);
}
