//! Tests for error types

use agent_dispatch::core::DashboardError;

#[test]
fn test_no_recipients_error() {
    let err = DashboardError::NoRecipients;
    assert_eq!(format!("{}", err), "no agents available for distribution");
}

#[test]
fn test_malformed_header_error() {
    let err = DashboardError::MalformedHeader {
        missing: vec!["phone".to_string(), "notes".to_string()],
    };
    assert_eq!(
        format!("{}", err),
        "CSV must contain columns: FirstName, Phone, Notes (missing: phone, notes)"
    );
}

#[test]
fn test_duplicate_agent_error() {
    let err = DashboardError::DuplicateAgent("ana@example.com".to_string());
    assert_eq!(
        format!("{}", err),
        "agent with email `ana@example.com` already exists"
    );
}

#[test]
fn test_not_found_helpers() {
    let err = DashboardError::agent_not_found("a1");
    assert_eq!(format!("{}", err), "agent not found: a1");
    let err = DashboardError::upload_not_found("u1");
    assert_eq!(format!("{}", err), "upload not found: u1");
}

#[test]
fn test_backend_error() {
    let err = DashboardError::Backend("disk full".to_string());
    assert_eq!(format!("{}", err), "backend error: disk full");
}

#[test]
fn test_into_anyhow() {
    let result: agent_dispatch::core::AppResult<()> = Err(DashboardError::Unauthorized.into());
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DashboardError>(),
        Some(DashboardError::Unauthorized)
    ));
}
