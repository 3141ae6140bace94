//! # Agent Dispatch
//!
//! Core of an admin dashboard that hands uploaded contact lists out to a
//! roster of agents.
//!
//! An administrator signs in, maintains the agent roster, and uploads a CSV of
//! contacts (`FirstName`, `Phone`, `Notes`). The records are split into one
//! contiguous slice per agent so that slice sizes differ by at most one, with
//! the larger slices going to the agents listed first. Each upload and its
//! per-agent lists are persisted for later review by upload or by agent.
//!
//! ## Key Features
//!
//! - **Deterministic Allocation**: `core::allocate` is a pure, order-preserving partition
//! - **CSV Intake**: header validation and row splitting with skipped-row reporting
//! - **Hashed Credentials**: salted PBKDF2-HMAC-SHA256 with constant-time verification
//! - **Explicit Sessions**: every call carries a session token; expired sessions are swept
//! - **Pluggable Storage**: in-memory store or an append-only JSON-lines journal
//! - **Audit Trail**: one event per administrative action
//!
//! ```rust,ignore
//! use agent_dispatch::builders::build_dashboard;
//! use agent_dispatch::config::DashboardConfig;
//! use agent_dispatch::core::{CsvFile, NewAgent};
//!
//! let service = build_dashboard(&DashboardConfig::from_env()?)?;
//! let session = service.login("admin@example.com", "admin123")?;
//!
//! service.create_agent(&session.token, NewAgent {
//!     name: "Ana".into(),
//!     email: "ana@example.com".into(),
//!     mobile_number: "5550100".into(),
//!     country_code: "+1".into(),
//!     password: "changeme".into(),
//! })?;
//!
//! let receipt = service.upload_csv(&session.token, CsvFile {
//!     file_name: "leads.csv".into(),
//!     mime_type: Some("text/csv".into()),
//!     content: "FirstName,Phone,Notes\nBob,555-0001,call\n".into(),
//! })?;
//! ```
//!
//! For complete flows, see `tests/dashboard_flow_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Records, allocation, CSV intake, credentials, sessions and the service.
pub mod core;
/// Configuration models for the service and its store.
pub mod config;
/// Builders to construct the service from configuration.
pub mod builders;
/// Infrastructure adapters for storage backends.
pub mod infra;
/// Runtime adapters and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
