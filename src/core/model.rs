//! Domain records: contacts, agents, administrators, uploads and distributed lists.

use serde::{Deserialize, Serialize};

use crate::core::credentials::PasswordHash;
use crate::util::serde::{AdminId, AgentId, ListId, UploadId};

/// One contact row taken from an uploaded CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Contact first name.
    pub first_name: String,
    /// Contact phone number as written in the source file.
    pub phone: String,
    /// Free-form notes.
    pub notes: String,
}

impl ContactRecord {
    /// Build a record from its three fields.
    pub fn new(
        first_name: impl Into<String>,
        phone: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            phone: phone.into(),
            notes: notes.into(),
        }
    }
}

/// Public view of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Stable identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Contact email, unique across agents.
    pub email: String,
    /// Mobile number without country code.
    pub mobile_number: String,
    /// Dialing prefix, e.g. `+1`.
    pub country_code: String,
    /// Creation timestamp in milliseconds since epoch.
    pub created_at_ms: u128,
}

/// Stored agent row, including credentials and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Stable identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Contact email, unique across agents.
    pub email: String,
    /// Mobile number without country code.
    pub mobile_number: String,
    /// Dialing prefix.
    pub country_code: String,
    /// Hashed agent password.
    pub password: PasswordHash,
    /// Administrator who created the agent.
    pub created_by: AdminId,
    /// Creation timestamp in milliseconds since epoch.
    pub created_at_ms: u128,
}

impl AgentRecord {
    /// Public view without credentials.
    pub fn to_agent(&self) -> Agent {
        Agent {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            mobile_number: self.mobile_number.clone(),
            country_code: self.country_code.clone(),
            created_at_ms: self.created_at_ms,
        }
    }
}

/// Input for creating an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAgent {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Mobile number.
    pub mobile_number: String,
    /// Dialing prefix.
    pub country_code: String,
    /// Initial password (hashed before storage).
    pub password: String,
}

/// Replacement profile fields for an existing agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpdate {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Mobile number.
    pub mobile_number: String,
    /// Dialing prefix.
    pub country_code: String,
}

/// Administrator role. Only one role exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full dashboard access.
    Admin,
}

/// Stored administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    /// Identifier.
    pub id: AdminId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: AdminRole,
    /// Hashed password.
    pub password: PasswordHash,
}

/// Administrator view returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Identifier.
    pub id: AdminId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: AdminRole,
}

impl AdminUser {
    /// Public view without credentials.
    pub fn profile(&self) -> AdminProfile {
        AdminProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Lifecycle of an upload.
///
/// The service commits an upload and its lists in one store call, so it only
/// ever writes `Completed`. `Processing` and `Failed` are accepted when reading
/// rows written by other producers of the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    /// Records are being distributed.
    Processing,
    /// Distribution committed.
    Completed,
    /// Distribution aborted.
    Failed,
}

/// Metadata for one processed CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvUpload {
    /// Identifier.
    pub id: UploadId,
    /// Original file name.
    pub file_name: String,
    /// Administrator who uploaded it.
    pub uploaded_by: AdminId,
    /// Number of records distributed.
    pub total_records: usize,
    /// Current status.
    pub status: UploadStatus,
    /// Upload timestamp in milliseconds since epoch.
    pub created_at_ms: u128,
}

/// One agent's share of one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributedList {
    /// Identifier.
    pub id: ListId,
    /// Originating upload.
    pub upload_id: UploadId,
    /// Receiving agent.
    pub agent_id: AgentId,
    /// Assigned records in source order.
    pub records: Vec<ContactRecord>,
    /// Number of assigned records.
    pub assigned_count: usize,
}
