//! API-facing request/response models.
//!
//! Field names follow the camelCase payloads of the dashboard frontend. The
//! functions here only translate between these models and
//! [`DashboardService`]; transport is left to the embedding application.

use serde::{Deserialize, Serialize};

use crate::core::{
    Agent, AgentAssignmentView, AgentCount, AgentUpdate, CsvFile, CsvUpload, DashboardError,
    DashboardService, DashboardStore, DistributedListView, LoginOutcome, NewAgent,
    UploadReceipt,
};
use crate::util::serde::{AgentId, SessionToken, UploadId};

/// Login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Admin email.
    pub email: String,
    /// Admin password.
    pub password: String,
}

/// Agent creation payload.
pub type CreateAgentRequest = NewAgent;

/// Agent update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentRequest {
    /// Agent to update.
    pub agent_id: AgentId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Mobile number.
    pub mobile_number: String,
    /// Dialing prefix.
    pub country_code: String,
}

/// CSV upload payload.
pub type CsvUploadRequest = CsvFile;

/// Upload response.
pub type UploadResponse = UploadReceipt;

/// Error body returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable machine-readable code.
    pub code: String,
    /// HTTP-style status the transport should use.
    pub status: u16,
    /// Human-readable message.
    pub message: String,
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let (code, status) = match &err {
            DashboardError::NoRecipients => ("no_recipients", 409),
            DashboardError::MalformedHeader { .. } => ("malformed_header", 400),
            DashboardError::DuplicateAgent(_) => ("duplicate_agent", 409),
            DashboardError::InvalidCredentials => ("invalid_credentials", 401),
            DashboardError::Unauthorized => ("unauthorized", 401),
            DashboardError::NotFound { .. } => ("not_found", 404),
            DashboardError::Validation(_) => ("validation", 400),
            DashboardError::UnsupportedFileType(_) => ("unsupported_file_type", 415),
            DashboardError::Backend(_) => ("backend", 500),
        };
        // Backend messages may carry file paths; keep them out of responses.
        let message = if status == 500 {
            "internal error".to_string()
        } else {
            err.to_string()
        };
        Self {
            code: code.to_string(),
            status,
            message,
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Authenticate an administrator.
pub fn login<S: DashboardStore>(
    service: &DashboardService<S>,
    req: &LoginRequest,
) -> Result<LoginOutcome, ApiError> {
    service
        .login(&req.email, &req.password)
        .map_err(ApiError::from)
}

/// Create an agent.
pub fn create_agent<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
    req: CreateAgentRequest,
) -> Result<AgentId, ApiError> {
    service.create_agent(token, req).map_err(ApiError::from)
}

/// Update an agent.
pub fn update_agent<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
    req: UpdateAgentRequest,
) -> Result<AgentId, ApiError> {
    let update = AgentUpdate {
        name: req.name,
        email: req.email,
        mobile_number: req.mobile_number,
        country_code: req.country_code,
    };
    service
        .update_agent(token, &req.agent_id, update)
        .map_err(ApiError::from)
}

/// List agents in roster order.
pub fn list_agents<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
) -> Result<Vec<Agent>, ApiError> {
    service.list_agents(token).map_err(ApiError::from)
}

/// Delete an agent. Unknown ids map to `not_found`.
pub fn delete_agent<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
    agent_id: &AgentId,
) -> Result<(), ApiError> {
    if service.delete_agent(token, agent_id)? {
        Ok(())
    } else {
        Err(DashboardError::agent_not_found(agent_id).into())
    }
}

/// Per-agent counts a file of `record_count` rows would produce.
pub fn preview_distribution<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
    record_count: usize,
) -> Result<Vec<AgentCount>, ApiError> {
    service
        .preview_distribution(token, record_count)
        .map_err(ApiError::from)
}

/// Upload history, newest first.
pub fn list_uploads<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
) -> Result<Vec<CsvUpload>, ApiError> {
    service.list_uploads(token).map_err(ApiError::from)
}

/// Lists produced by one upload.
pub fn distributed_lists<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
    upload_id: &UploadId,
) -> Result<Vec<DistributedListView>, ApiError> {
    service
        .distributed_lists(token, upload_id)
        .map_err(ApiError::from)
}

/// Lists assigned to one agent.
pub fn agent_records<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
    agent_id: &AgentId,
) -> Result<Vec<AgentAssignmentView>, ApiError> {
    service
        .agent_records(token, agent_id)
        .map_err(ApiError::from)
}

/// Upload and distribute a CSV file.
pub fn upload_csv<S: DashboardStore>(
    service: &DashboardService<S>,
    token: &SessionToken,
    req: CsvUploadRequest,
) -> Result<UploadResponse, ApiError> {
    service.upload_csv(token, req).map_err(ApiError::from)
}

/// Return a health payload.
pub const fn health() -> Health {
    Health { ok: true }
}
