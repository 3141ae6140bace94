//! Builders to construct the dashboard service from configuration.

use tracing::info;

use crate::config::{DashboardConfig, StoreBackendConfig};
use crate::core::{
    AuditSink, DashboardError, DashboardService, DashboardStore, InMemoryAuditSink,
    TracingAuditSink,
};
use crate::infra::{InMemoryStore, JournalStore};

/// Store type selected at runtime.
pub type BoxedStore = Box<dyn DashboardStore>;

const JOURNAL_STREAM: &str = "dashboard";

/// Open the store backend named by `cfg`.
pub fn open_store(cfg: &DashboardConfig) -> Result<BoxedStore, DashboardError> {
    match cfg.store {
        StoreBackendConfig::InMemory => Ok(Box::new(InMemoryStore::new())),
        StoreBackendConfig::File => {
            let dir = cfg
                .data_dir
                .as_ref()
                .ok_or_else(|| DashboardError::Backend("data_dir not configured".into()))?;
            Ok(Box::new(JournalStore::open(dir, JOURNAL_STREAM)?))
        }
    }
}

/// Validate `cfg`, open its store, attach an audit sink and create the
/// bootstrap administrator when one is configured.
///
/// A zero `audit_capacity` routes audit events to `tracing` instead of an
/// in-memory buffer.
pub fn build_dashboard(
    cfg: &DashboardConfig,
) -> Result<DashboardService<BoxedStore>, DashboardError> {
    cfg.validate()
        .map_err(|e| DashboardError::Backend(format!("config invalid: {e}")))?;

    let store = open_store(cfg)?;
    let audit: Box<dyn AuditSink> = if cfg.audit_capacity == 0 {
        Box::new(TracingAuditSink)
    } else {
        Box::new(InMemoryAuditSink::new(cfg.audit_capacity))
    };
    let service = DashboardService::new(store, cfg.service_settings()).with_audit(audit);

    if let Some(admin) = &cfg.default_admin {
        service.ensure_default_admin(&admin.email, &admin.name, &admin.password)?;
    }
    info!(store = ?cfg.store, "dashboard ready");
    Ok(service)
}
