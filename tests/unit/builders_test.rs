//! Tests for builder modules

use agent_dispatch::builders::{build_dashboard, open_store};
use agent_dispatch::config::{DashboardConfig, DefaultAdminConfig, StoreBackendConfig};
use agent_dispatch::core::{AgentRepository, DashboardError};

fn config_with_admin() -> DashboardConfig {
    DashboardConfig {
        pbkdf2_iterations: 1_000,
        default_admin: Some(DefaultAdminConfig {
            email: "admin@example.com".into(),
            name: "Admin User".into(),
            password: "admin123".into(),
        }),
        ..DashboardConfig::default()
    }
}

#[test]
fn test_open_in_memory_store() {
    let store = open_store(&DashboardConfig::default()).unwrap();
    assert!(store.list_agents().unwrap().is_empty());
}

#[test]
fn test_build_dashboard_bootstraps_admin() {
    let service = build_dashboard(&config_with_admin()).unwrap();
    let outcome = service.login("admin@example.com", "admin123").unwrap();
    assert_eq!(outcome.admin.name, "Admin User");

    let trail = service.audit_trail(&outcome.token).unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, "login");
}

#[test]
fn test_build_dashboard_tracing_audit() {
    let cfg = DashboardConfig {
        audit_capacity: 0,
        ..config_with_admin()
    };
    let service = build_dashboard(&cfg).unwrap();
    let outcome = service.login("admin@example.com", "admin123").unwrap();
    assert!(service.audit_trail(&outcome.token).unwrap().is_empty());
}

#[test]
fn test_build_dashboard_rejects_invalid_config() {
    let cfg = DashboardConfig {
        store: StoreBackendConfig::File,
        data_dir: None,
        ..DashboardConfig::default()
    };
    assert!(matches!(
        build_dashboard(&cfg),
        Err(DashboardError::Backend(_))
    ));
}

#[test]
fn test_build_dashboard_file_store() {
    let dir = std::env::temp_dir().join(format!("agent-dispatch-build-{}", uuid::Uuid::new_v4()));
    let cfg = DashboardConfig {
        store: StoreBackendConfig::File,
        data_dir: Some(dir.clone()),
        ..config_with_admin()
    };
    build_dashboard(&cfg).unwrap();
    assert!(dir.join("dashboard_journal.jsonl").exists());

    // Reopening finds the admin already present.
    let service = build_dashboard(&cfg).unwrap();
    assert!(service.login("admin@example.com", "admin123").is_ok());
    let _ = std::fs::remove_dir_all(&dir);
}
