//! Builders to construct the dashboard service from configuration.

pub mod dashboard_builder;

pub use dashboard_builder::{build_dashboard, open_store, BoxedStore};
