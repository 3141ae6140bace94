//! Configuration models for the dashboard service and its store.

pub mod dashboard;

pub use dashboard::{DashboardConfig, DefaultAdminConfig, StoreBackendConfig};
