//! File-backed store using an append-only JSON-lines journal.
//!
//! Each mutation is written as one line before it is applied to the in-memory
//! state, and the journal is replayed on open. An upload and all of its
//! distributed lists share a single line, so a crash never leaves half an
//! upload behind. A partial last line left by an interrupted append is cut
//! off on open; an unreadable line anywhere else fails the open.

use std::fs::{self, create_dir_all, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::model::{AdminUser, AgentRecord, CsvUpload, DistributedList};
use crate::core::{AdminRepository, AgentRepository, DashboardError, UploadRepository};
use crate::infra::store::memory::InMemoryStore;
use crate::util::serde::{AdminId, AgentId, UploadId};

/// One journal line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum JournalEntry {
    AdminInserted { admin: AdminUser },
    AgentInserted { agent: AgentRecord },
    AgentReplaced { agent: AgentRecord },
    AgentDeleted { id: AgentId },
    UploadCommitted {
        upload: CsvUpload,
        lists: Vec<DistributedList>,
    },
}

/// File-backed store persisted to `<path>/<stream>_journal.jsonl`.
pub struct JournalStore {
    path: PathBuf,
    stream: String,
    state: InMemoryStore,
}

fn backend(e: impl ToString) -> DashboardError {
    DashboardError::Backend(e.to_string())
}

impl JournalStore {
    /// Open (or create) a journal under `path` and replay it.
    pub fn open(path: impl AsRef<Path>, stream: impl Into<String>) -> Result<Self, DashboardError> {
        let path = path.as_ref().to_path_buf();
        let stream = stream.into();
        create_dir_all(&path).map_err(backend)?;
        let mut store = Self {
            path,
            stream,
            state: InMemoryStore::new(),
        };
        store.load_from_disk()?;
        Ok(store)
    }

    /// Location of the journal file.
    pub fn file_path(&self) -> PathBuf {
        self.path.join(format!("{}_journal.jsonl", self.stream))
    }

    fn load_from_disk(&mut self) -> Result<(), DashboardError> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(());
        }
        let bytes = fs::read(&file_path).map_err(backend)?;
        let (body, tail) = match bytes.iter().rposition(|b| *b == b'\n') {
            Some(pos) => bytes.split_at(pos + 1),
            None => bytes.split_at(0),
        };

        let mut entries = Vec::new();
        for line in body.split(|b| *b == b'\n') {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            entries.push(serde_json::from_slice::<JournalEntry>(line).map_err(backend)?);
        }

        // A tail without a newline comes from an interrupted append.
        if !tail.iter().all(u8::is_ascii_whitespace) {
            match serde_json::from_slice::<JournalEntry>(tail) {
                Ok(entry) => {
                    entries.push(entry);
                    let mut file = OpenOptions::new()
                        .append(true)
                        .open(&file_path)
                        .map_err(backend)?;
                    file.write_all(b"\n").map_err(backend)?;
                }
                Err(e) => {
                    warn!(
                        path = %file_path.display(),
                        offset = body.len(),
                        error = %e,
                        "truncating torn journal tail"
                    );
                    let file = OpenOptions::new()
                        .write(true)
                        .open(&file_path)
                        .map_err(backend)?;
                    file.set_len(body.len() as u64).map_err(backend)?;
                    file.sync_data().map_err(backend)?;
                }
            }
        }

        let replayed = entries.len();
        for entry in entries {
            self.apply(entry)?;
        }
        debug!(path = %file_path.display(), replayed, "journal replayed");
        Ok(())
    }

    fn append_to_disk(&self, entry: &JournalEntry) -> Result<(), DashboardError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_path())
            .map_err(backend)?;
        let mut buf = serde_json::to_vec(entry).map_err(backend)?;
        buf.push(b'\n');
        let len_before = file.metadata().map_err(backend)?.len();
        if let Err(e) = file.write_all(&buf).and_then(|()| file.sync_data()) {
            // Leave no partial line behind for the next append to follow.
            let _ = file.set_len(len_before);
            return Err(backend(e));
        }
        Ok(())
    }

    fn apply(&mut self, entry: JournalEntry) -> Result<(), DashboardError> {
        match entry {
            JournalEntry::AdminInserted { admin } => self.state.insert_admin(admin),
            JournalEntry::AgentInserted { agent } => self.state.insert_agent(agent),
            JournalEntry::AgentReplaced { agent } => self.state.replace_agent(agent),
            JournalEntry::AgentDeleted { id } => self.state.delete_agent(&id).map(|_| ()),
            JournalEntry::UploadCommitted { upload, lists } => {
                self.state.commit_upload(upload, lists)
            }
        }
    }
}

impl AdminRepository for JournalStore {
    fn insert_admin(&mut self, admin: AdminUser) -> Result<(), DashboardError> {
        if self.state.find_admin_by_email(&admin.email)?.is_some() {
            return Err(backend(format!("admin `{}` already exists", admin.email)));
        }
        let entry = JournalEntry::AdminInserted { admin };
        self.append_to_disk(&entry)?;
        self.apply(entry)
    }

    fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DashboardError> {
        self.state.find_admin_by_email(email)
    }

    fn get_admin(&self, id: &AdminId) -> Result<Option<AdminUser>, DashboardError> {
        self.state.get_admin(id)
    }
}

impl AgentRepository for JournalStore {
    fn insert_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError> {
        if self.state.find_agent_by_email(&agent.email)?.is_some() {
            return Err(DashboardError::DuplicateAgent(agent.email));
        }
        let entry = JournalEntry::AgentInserted { agent };
        self.append_to_disk(&entry)?;
        self.apply(entry)
    }

    fn replace_agent(&mut self, agent: AgentRecord) -> Result<(), DashboardError> {
        if self.state.get_agent(&agent.id)?.is_none() {
            return Err(DashboardError::agent_not_found(agent.id));
        }
        let entry = JournalEntry::AgentReplaced { agent };
        self.append_to_disk(&entry)?;
        self.apply(entry)
    }

    fn delete_agent(&mut self, id: &AgentId) -> Result<bool, DashboardError> {
        if self.state.get_agent(id)?.is_none() {
            return Ok(false);
        }
        let entry = JournalEntry::AgentDeleted { id: *id };
        self.append_to_disk(&entry)?;
        self.apply(entry)?;
        Ok(true)
    }

    fn get_agent(&self, id: &AgentId) -> Result<Option<AgentRecord>, DashboardError> {
        self.state.get_agent(id)
    }

    fn find_agent_by_email(&self, email: &str) -> Result<Option<AgentRecord>, DashboardError> {
        self.state.find_agent_by_email(email)
    }

    fn list_agents(&self) -> Result<Vec<AgentRecord>, DashboardError> {
        self.state.list_agents()
    }
}

impl UploadRepository for JournalStore {
    fn commit_upload(
        &mut self,
        upload: CsvUpload,
        lists: Vec<DistributedList>,
    ) -> Result<(), DashboardError> {
        if self.state.get_upload(&upload.id)?.is_some() {
            return Err(backend(format!("upload {} already committed", upload.id)));
        }
        if lists.iter().any(|l| l.upload_id != upload.id) {
            return Err(backend(format!(
                "distributed lists do not belong to upload {}",
                upload.id
            )));
        }
        let entry = JournalEntry::UploadCommitted { upload, lists };
        self.append_to_disk(&entry)?;
        self.apply(entry)
    }

    fn list_uploads(&self) -> Result<Vec<CsvUpload>, DashboardError> {
        self.state.list_uploads()
    }

    fn get_upload(&self, id: &UploadId) -> Result<Option<CsvUpload>, DashboardError> {
        self.state.get_upload(id)
    }

    fn lists_for_upload(&self, id: &UploadId) -> Result<Vec<DistributedList>, DashboardError> {
        self.state.lists_for_upload(id)
    }

    fn lists_for_agent(&self, id: &AgentId) -> Result<Vec<DistributedList>, DashboardError> {
        self.state.lists_for_agent(id)
    }
}
