//! In-memory store preserving insertion order.

use crate::core::model::{AdminUser, AgentRecord, CsvUpload, DistributedList};
use crate::core::{AdminRepository, AgentRepository, DashboardError, UploadRepository};
use crate::util::serde::{AdminId, AgentId, UploadId};

/// Simple in-memory store for development/testing.
///
/// Rows live in vectors so every listing comes back in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    admins: Vec<AdminUser>,
    agents: Vec<AgentRecord>,
    uploads: Vec<CsvUpload>,
    lists: Vec<DistributedList>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdminRepository for InMemoryStore {
    fn insert_admin(&mut self, admin: AdminUser) -> Result<(), DashboardError> {
        if self.admins.iter().any(|a| a.email == admin.email) {
            return Err(DashboardError::Backend(format!(
                "admin `{}` already exists",
                admin.email
            )));
        }
        self.admins.push(admin);
        Ok(())
    }

    fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DashboardError> {
        Ok(self.admins.iter().find(|a| a.email == email).cloned())
    }

    fn get_admin(&self, id: &AdminId) -> Result<Option<AdminUser>, DashboardError> {
        Ok(self.admins.iter().find(|a| &a.id == id).cloned())
    }
}

impl AgentRepository for InMemoryStore {
    fn insert_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError> {
        if self.agents.iter().any(|a| a.email == agent.email) {
            return Err(DashboardError::DuplicateAgent(agent.email));
        }
        self.agents.push(agent);
        Ok(())
    }

    fn replace_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError> {
        let slot = self
            .agents
            .iter_mut()
            .find(|a| a.id == agent.id)
            .ok_or_else(|| DashboardError::agent_not_found(agent.id))?;
        *slot = agent;
        Ok(())
    }

    fn delete_agent(&mut self, id: &AgentId) -> Result<bool, DashboardError> {
        let before = self.agents.len();
        self.agents.retain(|a| &a.id != id);
        Ok(self.agents.len() != before)
    }

    fn get_agent(&self, id: &AgentId) -> Result<Option<AgentRecord>, DashboardError> {
        Ok(self.agents.iter().find(|a| &a.id == id).cloned())
    }

    fn find_agent_by_email(&self, email: &str) -> Result<Option<AgentRecord>, DashboardError> {
        Ok(self.agents.iter().find(|a| a.email == email).cloned())
    }

    fn list_agents(&self) -> Result<Vec<AgentRecord>, DashboardError> {
        Ok(self.agents.clone())
    }
}

impl UploadRepository for InMemoryStore {
    fn commit_upload(
        &mut self,
        upload: CsvUpload,
        lists: Vec<DistributedList>,
    ) -> Result<(), DashboardError> {
        if self.uploads.iter().any(|u| u.id == upload.id) {
            return Err(DashboardError::Backend(format!(
                "upload {} already committed",
                upload.id
            )));
        }
        if let Some(stray) = lists.iter().find(|l| l.upload_id != upload.id) {
            return Err(DashboardError::Backend(format!(
                "list {} does not belong to upload {}",
                stray.id, upload.id
            )));
        }
        self.uploads.push(upload);
        self.lists.extend(lists);
        Ok(())
    }

    fn list_uploads(&self) -> Result<Vec<CsvUpload>, DashboardError> {
        Ok(self.uploads.clone())
    }

    fn get_upload(&self, id: &UploadId) -> Result<Option<CsvUpload>, DashboardError> {
        Ok(self.uploads.iter().find(|u| &u.id == id).cloned())
    }

    fn lists_for_upload(&self, id: &UploadId) -> Result<Vec<DistributedList>, DashboardError> {
        Ok(self
            .lists
            .iter()
            .filter(|l| &l.upload_id == id)
            .cloned()
            .collect())
    }

    fn lists_for_agent(&self, id: &AgentId) -> Result<Vec<DistributedList>, DashboardError> {
        Ok(self
            .lists
            .iter()
            .filter(|l| &l.agent_id == id)
            .cloned()
            .collect())
    }
}
