//! Runtime adapters and API surface.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod session_sweeper;

pub use api::{
    ApiError, CreateAgentRequest, CsvUploadRequest, Health, LoginRequest, UpdateAgentRequest,
    UploadResponse,
};
#[cfg(feature = "tokio-runtime")]
pub use session_sweeper::SessionSweeper;
