//! Tests for audit sink

use agent_dispatch::core::{build_audit_event, AuditSink, InMemoryAuditSink, TracingAuditSink};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event(
        "admin@example.com",
        "agent_created",
        "agent-1",
        Some("ana@example.com".to_string()),
    );

    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].event_id, event.event_id);
    assert_eq!(events[0].actor, "admin@example.com");
    assert_eq!(events[0].action, "agent_created");
    assert_eq!(sink.recent().len(), 1);
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event("a", "login", "s1", None));
    sink.record(build_audit_event("a", "agent_created", "s2", None));
    sink.record(build_audit_event("a", "logout", "s3", None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].subject, "s2"); // First one popped
    assert_eq!(events[1].subject, "s3");
}

#[test]
fn test_zero_capacity_keeps_nothing() {
    let mut sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event("a", "login", "s1", None));
    assert!(sink.events().is_empty());
}

#[test]
fn test_tracing_sink_keeps_nothing() {
    let mut sink = TracingAuditSink;
    sink.record(build_audit_event("a", "login", "s1", None));
    assert!(sink.recent().is_empty());
}

#[test]
fn test_build_audit_event() {
    let event = build_audit_event(
        "admin@example.com",
        "upload_committed",
        "upload-1",
        Some("leads.csv: 7 records".to_string()),
    );

    assert_eq!(event.actor, "admin@example.com");
    assert_eq!(event.action, "upload_committed");
    assert_eq!(event.subject, "upload-1");
    assert_eq!(event.payload, Some("leads.csv: 7 records".to_string()));
    assert!(!event.event_id.is_empty());
    assert!(event.created_at_ms > 0);

    let other = build_audit_event("a", "b", "c", None);
    assert_ne!(event.event_id, other.event_id);
}
