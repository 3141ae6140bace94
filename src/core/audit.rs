//! Audit sink implementations.
//!
//! Every administrative action produces one [`AuditEvent`]. Sinks decide where
//! it goes: a bounded in-memory buffer for inspection, or the tracing pipeline.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::util::clock::now_ms;

/// Audit event structure.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: String,
    /// Acting administrator (email, or the attempted email for failed logins).
    pub actor: String,
    /// Action taken (login, login_failed, logout, agent_created, agent_updated,
    /// agent_deleted, upload_committed).
    pub action: String,
    /// Identifier of the affected entity.
    pub subject: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context.
    pub payload: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);

    /// Events still held by the sink, oldest first. Sinks that forward events
    /// elsewhere keep none.
    fn recent(&self) -> Vec<AuditEvent> {
        Vec::new()
    }
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn recent(&self) -> Vec<AuditEvent> {
        self.events()
    }
}

/// Sink that forwards events to `tracing` under the `audit` target.
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&mut self, event: AuditEvent) {
        tracing::info!(
            target: "audit",
            event_id = %event.event_id,
            actor = %event.actor,
            action = %event.action,
            subject = %event.subject,
            payload = event.payload.as_deref().unwrap_or(""),
            "audit"
        );
    }
}

/// Helper to build an audit event with a fresh id and the current time.
pub fn build_audit_event(
    actor: impl Into<String>,
    action: impl Into<String>,
    subject: impl Into<String>,
    payload: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: Uuid::new_v4().to_string(),
        actor: actor.into(),
        action: action.into(),
        subject: subject.into(),
        created_at_ms: now_ms(),
        payload,
    }
}
