//! Storage abstractions for administrators, agents and uploads.
//!
//! Listing methods must return rows in insertion order; allocation relies on
//! the agent listing order for its tie-break.

use crate::core::model::{AdminUser, AgentRecord, CsvUpload, DistributedList};
use crate::core::DashboardError;
use crate::util::serde::{AdminId, AgentId, UploadId};

/// Administrator account storage.
pub trait AdminRepository {
    /// Insert a new administrator.
    fn insert_admin(&mut self, admin: AdminUser) -> Result<(), DashboardError>;
    /// Look up an administrator by login email.
    fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DashboardError>;
    /// Look up an administrator by id.
    fn get_admin(&self, id: &AdminId) -> Result<Option<AdminUser>, DashboardError>;
}

/// Agent roster storage.
pub trait AgentRepository {
    /// Insert a new agent at the end of the roster.
    fn insert_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError>;
    /// Replace an existing agent in place, keeping its roster position.
    fn replace_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError>;
    /// Remove an agent. Returns false when it did not exist.
    fn delete_agent(&mut self, id: &AgentId) -> Result<bool, DashboardError>;
    /// Look up an agent by id.
    fn get_agent(&self, id: &AgentId) -> Result<Option<AgentRecord>, DashboardError>;
    /// Look up an agent by email.
    fn find_agent_by_email(&self, email: &str) -> Result<Option<AgentRecord>, DashboardError>;
    /// All agents in insertion order.
    fn list_agents(&self) -> Result<Vec<AgentRecord>, DashboardError>;
}

/// Upload and distribution storage.
pub trait UploadRepository {
    /// Persist an upload together with all of its distributed lists as one unit.
    fn commit_upload(
        &mut self,
        upload: CsvUpload,
        lists: Vec<DistributedList>,
    ) -> Result<(), DashboardError>;
    /// All uploads in insertion order.
    fn list_uploads(&self) -> Result<Vec<CsvUpload>, DashboardError>;
    /// Look up an upload by id.
    fn get_upload(&self, id: &UploadId) -> Result<Option<CsvUpload>, DashboardError>;
    /// Distributed lists of one upload, in roster order at upload time.
    fn lists_for_upload(&self, id: &UploadId) -> Result<Vec<DistributedList>, DashboardError>;
    /// Distributed lists assigned to one agent, oldest upload first.
    fn lists_for_agent(&self, id: &AgentId) -> Result<Vec<DistributedList>, DashboardError>;
}

/// Complete backing store used by the dashboard service.
pub trait DashboardStore: AdminRepository + AgentRepository + UploadRepository + Send {}

impl<T> DashboardStore for T where T: AdminRepository + AgentRepository + UploadRepository + Send {}

impl<S: AdminRepository + ?Sized> AdminRepository for Box<S> {
    fn insert_admin(&mut self, admin: AdminUser) -> Result<(), DashboardError> {
        (**self).insert_admin(admin)
    }

    fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DashboardError> {
        (**self).find_admin_by_email(email)
    }

    fn get_admin(&self, id: &AdminId) -> Result<Option<AdminUser>, DashboardError> {
        (**self).get_admin(id)
    }
}

impl<S: AgentRepository + ?Sized> AgentRepository for Box<S> {
    fn insert_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError> {
        (**self).insert_agent(agent)
    }

    fn replace_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError> {
        (**self).replace_agent(agent)
    }

    fn delete_agent(&mut self, id: &AgentId) -> Result<bool, DashboardError> {
        (**self).delete_agent(id)
    }

    fn get_agent(&self, id: &AgentId) -> Result<Option<AgentRecord>, DashboardError> {
        (**self).get_agent(id)
    }

    fn find_agent_by_email(&self, email: &str) -> Result<Option<AgentRecord>, DashboardError> {
        (**self).find_agent_by_email(email)
    }

    fn list_agents(&self) -> Result<Vec<AgentRecord>, DashboardError> {
        (**self).list_agents()
    }
}

impl<S: UploadRepository + ?Sized> UploadRepository for Box<S> {
    fn commit_upload(
        &mut self,
        upload: CsvUpload,
        lists: Vec<DistributedList>,
    ) -> Result<(), DashboardError> {
        (**self).commit_upload(upload, lists)
    }

    fn list_uploads(&self) -> Result<Vec<CsvUpload>, DashboardError> {
        (**self).list_uploads()
    }

    fn get_upload(&self, id: &UploadId) -> Result<Option<CsvUpload>, DashboardError> {
        (**self).get_upload(id)
    }

    fn lists_for_upload(&self, id: &UploadId) -> Result<Vec<DistributedList>, DashboardError> {
        (**self).lists_for_upload(id)
    }

    fn lists_for_agent(&self, id: &AgentId) -> Result<Vec<DistributedList>, DashboardError> {
        (**self).lists_for_agent(id)
    }
}
