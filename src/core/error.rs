//! Error types for dashboard operations.

use thiserror::Error;

/// Errors produced by dashboard components.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// No agents exist to receive records.
    #[error("no agents available for distribution")]
    NoRecipients,
    /// CSV header row lacks one or more required columns.
    #[error("CSV must contain columns: FirstName, Phone, Notes (missing: {})", .missing.join(", "))]
    MalformedHeader {
        /// Required column names not found in the header.
        missing: Vec<String>,
    },
    /// An agent with the same email already exists.
    #[error("agent with email `{0}` already exists")]
    DuplicateAgent(String),
    /// Email/password pair did not match an administrator.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Session token is unknown, revoked, or expired.
    #[error("unauthorized")]
    Unauthorized,
    /// Referenced entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind (agent, upload, admin).
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },
    /// Input failed field validation.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Uploaded file is not a CSV/XLS/XLSX file.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

impl DashboardError {
    /// Shorthand for a missing agent.
    pub fn agent_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "agent",
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing upload.
    pub fn upload_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "upload",
            id: id.to_string(),
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
