//! Core dashboard abstractions: records, allocation, intake and the service.

pub mod error;
pub mod model;
pub mod allocator;
pub mod csv_parser;
pub mod credentials;
pub mod session;
pub mod store;
pub mod audit;
pub mod dashboard;

pub use error::{AppResult, DashboardError};
pub use model::{
    AdminProfile, AdminRole, AdminUser, Agent, AgentRecord, AgentUpdate, ContactRecord,
    CsvUpload, DistributedList, NewAgent, UploadStatus,
};
pub use allocator::{allocate, share_sizes, AgentShare, Allocation};
pub use csv_parser::{parse_contacts, validate_file_type, ParsedCsv, SkippedLine};
pub use credentials::{PasswordHash, DEFAULT_PBKDF2_ITERATIONS};
pub use session::{Session, SessionRegistry};
pub use store::{AdminRepository, AgentRepository, DashboardStore, UploadRepository};
pub use audit::{AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink, build_audit_event};
pub use dashboard::{
    AgentAssignmentView, AgentCount, AgentSummary, CsvFile, DashboardService,
    DistributedListView, LoginOutcome, ServiceSettings, UploadReceipt, UploadSummary,
};
