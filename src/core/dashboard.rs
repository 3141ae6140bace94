//! Dashboard service: authentication, agent roster and upload distribution.
//!
//! Every administrative call takes the caller's [`SessionToken`]; there is no
//! ambient "current admin". The store, the session registry and the audit sink
//! each sit behind their own `parking_lot::Mutex`, so the service is `Send +
//! Sync` and cheap to clone into background tasks.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::allocator::{allocate, share_sizes};
use crate::core::credentials::{PasswordHash, DEFAULT_PBKDF2_ITERATIONS};
use crate::core::csv_parser::{parse_contacts, validate_file_type, SkippedLine};
use crate::core::model::{
    AdminProfile, AdminRole, AdminUser, Agent, AgentRecord, AgentUpdate, ContactRecord,
    CsvUpload, DistributedList, NewAgent, UploadStatus,
};
use crate::core::session::{Session, SessionRegistry};
use crate::core::store::DashboardStore;
use crate::core::{build_audit_event, AuditEvent, AuditSink, DashboardError};
use crate::util::clock::now_ms;
use crate::util::serde::{AdminId, AgentId, ListId, SessionToken, UploadId};

/// Tunables for the dashboard service.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Lifetime of an issued session.
    pub session_ttl: Duration,
    /// PBKDF2 iterations for newly hashed passwords.
    pub pbkdf2_iterations: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(8 * 60 * 60),
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Token to present on later calls.
    pub token: SessionToken,
    /// Authenticated administrator.
    pub admin: AdminProfile,
    /// Expiry in milliseconds since epoch.
    pub expires_at_ms: u128,
}

/// Uploaded file as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvFile {
    /// Original file name.
    pub file_name: String,
    /// Browser-reported mime type, if any.
    pub mime_type: Option<String>,
    /// File content as text.
    pub content: String,
}

/// Number of records an agent received (or would receive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCount {
    /// Agent identifier.
    pub agent_id: AgentId,
    /// Agent display name.
    pub agent_name: String,
    /// Record count.
    pub records: usize,
}

/// Summary of a committed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    /// New upload id.
    pub upload_id: UploadId,
    /// Records distributed.
    pub total_records: usize,
    /// Per-agent counts in roster order.
    pub assignments: Vec<AgentCount>,
    /// CSV rows dropped for having too few fields.
    pub skipped: Vec<SkippedLine>,
}

/// Agent fields shown next to a distributed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    /// Agent identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Upload fields shown next to an agent's assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    /// Upload identifier.
    pub id: UploadId,
    /// Original file name.
    pub file_name: String,
    /// Upload time in milliseconds since epoch.
    pub uploaded_at_ms: u128,
}

/// A distributed list as seen from its upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributedListView {
    /// List identifier.
    pub id: ListId,
    /// Receiving agent, or `None` once deleted.
    pub agent: Option<AgentSummary>,
    /// Assigned records.
    pub records: Vec<ContactRecord>,
    /// Number of assigned records.
    pub assigned_count: usize,
}

/// A distributed list as seen from its agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAssignmentView {
    /// List identifier.
    pub id: ListId,
    /// Originating upload, or `None` if missing.
    pub csv_upload: Option<UploadSummary>,
    /// Assigned records.
    pub records: Vec<ContactRecord>,
    /// Number of assigned records.
    pub assigned_count: usize,
}

/// The dashboard service.
pub struct DashboardService<S> {
    store: Arc<Mutex<S>>,
    sessions: Arc<Mutex<SessionRegistry>>,
    audit: Option<Arc<Mutex<Box<dyn AuditSink>>>>,
    settings: ServiceSettings,
}

impl<S> Clone for DashboardService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sessions: Arc::clone(&self.sessions),
            audit: self.audit.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl<S: DashboardStore> DashboardService<S> {
    /// Create a service over `store`.
    pub fn new(store: S, settings: ServiceSettings) -> Self {
        let sessions = SessionRegistry::new(settings.session_ttl);
        Self {
            store: Arc::new(Mutex::new(store)),
            sessions: Arc::new(Mutex::new(sessions)),
            audit: None,
            settings,
        }
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Arc::new(Mutex::new(audit)));
        self
    }

    fn audit(&self, actor: &str, action: &str, subject: &str, payload: Option<String>) {
        if let Some(sink) = &self.audit {
            sink.lock()
                .record(build_audit_event(actor, action, subject, payload));
        }
    }

    /// Audit events retained by the attached sink, oldest first.
    pub fn audit_trail(&self, token: &SessionToken) -> Result<Vec<AuditEvent>, DashboardError> {
        self.authorize(token)?;
        Ok(self
            .audit
            .as_ref()
            .map(|sink| sink.lock().recent())
            .unwrap_or_default())
    }

    // ── Authentication ───────────────────────────────────────────────────────

    /// Create the administrator unless one with `email` already exists.
    ///
    /// Returns the id of the new or existing account.
    pub fn ensure_default_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AdminId, DashboardError> {
        let email = required("email", email)?;
        let name = required("name", name)?;
        let mut store = self.store.lock();
        if let Some(existing) = store.find_admin_by_email(&email)? {
            debug!(admin = %existing.id, "default admin already present");
            return Ok(existing.id);
        }
        let admin = AdminUser {
            id: AdminId::new(),
            email: email.clone(),
            name,
            role: AdminRole::Admin,
            password: PasswordHash::create(password, self.settings.pbkdf2_iterations)?,
        };
        let id = admin.id;
        store.insert_admin(admin)?;
        info!(admin = %id, email = %email, "created default admin");
        Ok(id)
    }

    /// Verify credentials and open a session.
    ///
    /// The email is trimmed before lookup, matching how accounts are stored.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, DashboardError> {
        let email = email.trim();
        let admin = self.store.lock().find_admin_by_email(email)?;
        let Some(admin) = admin.filter(|a| a.password.verify(password)) else {
            warn!(email, "admin login rejected");
            self.audit(email, "login_failed", email, None);
            return Err(DashboardError::InvalidCredentials);
        };
        let session = self.sessions.lock().issue(admin.id, now_ms());
        info!(admin = %admin.id, "admin logged in");
        self.audit(&admin.email, "login", &admin.id.to_string(), None);
        Ok(LoginOutcome {
            token: session.token,
            admin: admin.profile(),
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Revoke a session. Returns whether it existed.
    pub fn logout(&self, token: &SessionToken) -> bool {
        let Some(session) = self.sessions.lock().resolve(token, now_ms()) else {
            return false;
        };
        let revoked = self.sessions.lock().revoke(token);
        if revoked {
            info!(admin = %session.admin_id, "admin logged out");
            self.audit(&session.admin_id.to_string(), "logout", &session.admin_id.to_string(), None);
        }
        revoked
    }

    /// Administrator behind `token`.
    pub fn current_admin(&self, token: &SessionToken) -> Result<AdminProfile, DashboardError> {
        self.authorize(token).map(|admin| admin.profile())
    }

    /// Drop expired sessions and return how many were removed.
    pub fn prune_expired_sessions(&self) -> usize {
        let pruned = self.sessions.lock().prune_expired(now_ms());
        if pruned > 0 {
            debug!(pruned, "pruned expired sessions");
        }
        pruned
    }

    fn authorize(&self, token: &SessionToken) -> Result<AdminUser, DashboardError> {
        let session: Session = self
            .sessions
            .lock()
            .resolve(token, now_ms())
            .ok_or(DashboardError::Unauthorized)?;
        match self.store.lock().get_admin(&session.admin_id)? {
            Some(admin) => Ok(admin),
            None => {
                self.sessions.lock().revoke(token);
                Err(DashboardError::Unauthorized)
            }
        }
    }

    // ── Agent roster ─────────────────────────────────────────────────────────

    /// Register a new agent.
    pub fn create_agent(
        &self,
        token: &SessionToken,
        input: NewAgent,
    ) -> Result<AgentId, DashboardError> {
        let admin = self.authorize(token)?;
        let name = required("name", &input.name)?;
        let email = required("email", &input.email)?;
        let mobile_number = required("mobileNumber", &input.mobile_number)?;
        let country_code = required("countryCode", &input.country_code)?;
        required("password", &input.password)?;
        let password = PasswordHash::create(&input.password, self.settings.pbkdf2_iterations)?;

        let mut store = self.store.lock();
        if store.find_agent_by_email(&email)?.is_some() {
            return Err(DashboardError::DuplicateAgent(email));
        }
        let record = AgentRecord {
            id: AgentId::new(),
            name,
            email,
            mobile_number,
            country_code,
            password,
            created_by: admin.id,
            created_at_ms: now_ms(),
        };
        let id = record.id;
        let email = record.email.clone();
        store.insert_agent(record)?;
        drop(store);

        info!(agent = %id, email = %email, "agent created");
        self.audit(&admin.email, "agent_created", &id.to_string(), Some(email));
        Ok(id)
    }

    /// All agents in roster order.
    pub fn list_agents(&self, token: &SessionToken) -> Result<Vec<Agent>, DashboardError> {
        self.authorize(token)?;
        let agents = self.store.lock().list_agents()?;
        Ok(agents.iter().map(AgentRecord::to_agent).collect())
    }

    /// One agent by id.
    pub fn get_agent(
        &self,
        token: &SessionToken,
        id: &AgentId,
    ) -> Result<Option<Agent>, DashboardError> {
        self.authorize(token)?;
        Ok(self.store.lock().get_agent(id)?.map(|a| a.to_agent()))
    }

    /// Replace an agent's profile fields.
    pub fn update_agent(
        &self,
        token: &SessionToken,
        id: &AgentId,
        update: AgentUpdate,
    ) -> Result<AgentId, DashboardError> {
        let admin = self.authorize(token)?;
        let name = required("name", &update.name)?;
        let email = required("email", &update.email)?;
        let mobile_number = required("mobileNumber", &update.mobile_number)?;
        let country_code = required("countryCode", &update.country_code)?;

        let mut store = self.store.lock();
        let mut record = store
            .get_agent(id)?
            .ok_or_else(|| DashboardError::agent_not_found(id))?;
        if let Some(other) = store.find_agent_by_email(&email)? {
            if other.id != *id {
                return Err(DashboardError::DuplicateAgent(email));
            }
        }
        record.name = name;
        record.email = email;
        record.mobile_number = mobile_number;
        record.country_code = country_code;
        store.replace_agent(record)?;
        drop(store);

        info!(agent = %id, "agent updated");
        self.audit(&admin.email, "agent_updated", &id.to_string(), None);
        Ok(*id)
    }

    /// Remove an agent. Earlier distributed lists keep their reference.
    pub fn delete_agent(&self, token: &SessionToken, id: &AgentId) -> Result<bool, DashboardError> {
        let admin = self.authorize(token)?;
        let deleted = self.store.lock().delete_agent(id)?;
        if deleted {
            info!(agent = %id, "agent deleted");
            self.audit(&admin.email, "agent_deleted", &id.to_string(), None);
        }
        Ok(deleted)
    }

    /// How `record_count` records would be split over the current roster.
    pub fn preview_distribution(
        &self,
        token: &SessionToken,
        record_count: usize,
    ) -> Result<Vec<AgentCount>, DashboardError> {
        self.authorize(token)?;
        let agents = self.store.lock().list_agents()?;
        let sizes = share_sizes(record_count, agents.len())?;
        Ok(agents
            .into_iter()
            .zip(sizes)
            .map(|(agent, records)| AgentCount {
                agent_id: agent.id,
                agent_name: agent.name,
                records,
            })
            .collect())
    }

    // ── Uploads ──────────────────────────────────────────────────────────────

    /// Validate, parse and distribute an uploaded CSV file.
    pub fn upload_csv(
        &self,
        token: &SessionToken,
        file: CsvFile,
    ) -> Result<UploadReceipt, DashboardError> {
        self.authorize(token)?;
        validate_file_type(&file.file_name, file.mime_type.as_deref())?;
        let parsed = parse_contacts(&file.content)?;
        let mut receipt = self.process_records(token, &file.file_name, parsed.records)?;
        receipt.skipped = parsed.skipped;
        Ok(receipt)
    }

    /// Distribute already-parsed records over the roster and persist the result.
    ///
    /// Nothing is stored unless the whole distribution succeeds.
    pub fn process_records(
        &self,
        token: &SessionToken,
        file_name: &str,
        records: Vec<ContactRecord>,
    ) -> Result<UploadReceipt, DashboardError> {
        let admin = self.authorize(token)?;
        let mut store = self.store.lock();
        let roster = store.list_agents()?;
        let agents: Vec<Agent> = roster.iter().map(AgentRecord::to_agent).collect();

        let total_records = records.len();
        let allocation = allocate(records, &agents)?;

        let upload = CsvUpload {
            id: UploadId::new(),
            file_name: file_name.to_string(),
            uploaded_by: admin.id,
            total_records,
            status: UploadStatus::Completed,
            created_at_ms: now_ms(),
        };
        let upload_id = upload.id;

        let mut assignments = Vec::with_capacity(agents.len());
        let mut lists = Vec::with_capacity(agents.len());
        for (agent, share) in agents.iter().zip(allocation.into_shares()) {
            assignments.push(AgentCount {
                agent_id: agent.id,
                agent_name: agent.name.clone(),
                records: share.records.len(),
            });
            lists.push(DistributedList {
                id: ListId::new(),
                upload_id,
                agent_id: share.agent_id,
                assigned_count: share.records.len(),
                records: share.records,
            });
        }

        store.commit_upload(upload, lists)?;
        drop(store);

        info!(
            upload = %upload_id,
            file_name,
            total_records,
            agents = agents.len(),
            "upload distributed"
        );
        self.audit(
            &admin.email,
            "upload_committed",
            &upload_id.to_string(),
            Some(format!("{file_name}: {total_records} records")),
        );
        Ok(UploadReceipt {
            upload_id,
            total_records,
            assignments,
            skipped: Vec::new(),
        })
    }

    /// All uploads, newest first.
    pub fn list_uploads(&self, token: &SessionToken) -> Result<Vec<CsvUpload>, DashboardError> {
        self.authorize(token)?;
        let mut uploads = self.store.lock().list_uploads()?;
        uploads.reverse();
        Ok(uploads)
    }

    /// Distributed lists of one upload with their agents.
    pub fn distributed_lists(
        &self,
        token: &SessionToken,
        upload_id: &UploadId,
    ) -> Result<Vec<DistributedListView>, DashboardError> {
        self.authorize(token)?;
        let store = self.store.lock();
        if store.get_upload(upload_id)?.is_none() {
            return Err(DashboardError::upload_not_found(upload_id));
        }
        store
            .lists_for_upload(upload_id)?
            .into_iter()
            .map(|list| -> Result<DistributedListView, DashboardError> {
                let agent = store.get_agent(&list.agent_id)?.map(|a| AgentSummary {
                    id: a.id,
                    name: a.name,
                    email: a.email,
                });
                Ok(DistributedListView {
                    id: list.id,
                    agent,
                    records: list.records,
                    assigned_count: list.assigned_count,
                })
            })
            .collect()
    }

    /// Every list ever assigned to `agent_id`, with its upload.
    pub fn agent_records(
        &self,
        token: &SessionToken,
        agent_id: &AgentId,
    ) -> Result<Vec<AgentAssignmentView>, DashboardError> {
        self.authorize(token)?;
        let store = self.store.lock();
        store
            .lists_for_agent(agent_id)?
            .into_iter()
            .map(|list| -> Result<AgentAssignmentView, DashboardError> {
                let csv_upload = store.get_upload(&list.upload_id)?.map(|u| UploadSummary {
                    id: u.id,
                    file_name: u.file_name,
                    uploaded_at_ms: u.created_at_ms,
                });
                Ok(AgentAssignmentView {
                    id: list.id,
                    csv_upload,
                    records: list.records,
                    assigned_count: list.assigned_count,
                })
            })
            .collect()
    }
}

fn required(field: &str, value: &str) -> Result<String, DashboardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
