//! Dashboard configuration structures.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ServiceSettings, DEFAULT_PBKDF2_ITERATIONS};

const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 60 * 60;
const DEFAULT_AUDIT_CAPACITY: usize = 1024;

/// Store backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendConfig {
    /// In-memory store for development/testing.
    InMemory,
    /// JSON-lines journal under `data_dir`.
    File,
}

/// Administrator created on startup when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultAdminConfig {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Initial password.
    pub password: String,
}

/// Root dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Store backend selection.
    pub store: StoreBackendConfig,
    /// Directory for the file backend.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// PBKDF2 iterations for new password hashes.
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
    /// Number of audit events kept in memory.
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,
    /// Administrator bootstrapped on startup.
    #[serde(default)]
    pub default_admin: Option<DefaultAdminConfig>,
}

const fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

const fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_PBKDF2_ITERATIONS
}

const fn default_audit_capacity() -> usize {
    DEFAULT_AUDIT_CAPACITY
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            store: StoreBackendConfig::InMemory,
            data_dir: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            default_admin: None,
        }
    }
}

impl DefaultAdminConfig {
    /// Validate the bootstrap account.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("email must not be empty".into());
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        if self.password.is_empty() {
            return Err("password must not be empty".into());
        }
        Ok(())
    }
}

impl DashboardConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.store == StoreBackendConfig::File && self.data_dir.is_none() {
            return Err("data_dir is required for the file store".into());
        }
        if self.session_ttl_secs == 0 {
            return Err("session_ttl_secs must be greater than 0".into());
        }
        if self.pbkdf2_iterations == 0 {
            return Err("pbkdf2_iterations must be greater than 0".into());
        }
        if let Some(admin) = &self.default_admin {
            admin
                .validate()
                .map_err(|e| format!("default_admin invalid: {e}"))?;
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from `DASHBOARD_*` environment variables, loading a
    /// `.env` file first when one exists.
    ///
    /// Recognised variables: `DASHBOARD_STORE` (`in_memory` | `file`),
    /// `DASHBOARD_DATA_DIR`, `DASHBOARD_SESSION_TTL_SECS`,
    /// `DASHBOARD_PBKDF2_ITERATIONS`, `DASHBOARD_AUDIT_CAPACITY`, and
    /// `DASHBOARD_ADMIN_EMAIL` / `DASHBOARD_ADMIN_NAME` /
    /// `DASHBOARD_ADMIN_PASSWORD` for the bootstrap account.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(store) = lookup("DASHBOARD_STORE") {
            cfg.store = match store.trim() {
                "in_memory" | "memory" => StoreBackendConfig::InMemory,
                "file" => StoreBackendConfig::File,
                other => return Err(format!("unknown DASHBOARD_STORE `{other}`")),
            };
        }
        if let Some(dir) = lookup("DASHBOARD_DATA_DIR") {
            cfg.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(v) = lookup("DASHBOARD_SESSION_TTL_SECS") {
            cfg.session_ttl_secs = parse_var("DASHBOARD_SESSION_TTL_SECS", &v)?;
        }
        if let Some(v) = lookup("DASHBOARD_PBKDF2_ITERATIONS") {
            cfg.pbkdf2_iterations = parse_var("DASHBOARD_PBKDF2_ITERATIONS", &v)?;
        }
        if let Some(v) = lookup("DASHBOARD_AUDIT_CAPACITY") {
            cfg.audit_capacity = parse_var("DASHBOARD_AUDIT_CAPACITY", &v)?;
        }
        if let Some(email) = lookup("DASHBOARD_ADMIN_EMAIL") {
            cfg.default_admin = Some(DefaultAdminConfig {
                email,
                name: lookup("DASHBOARD_ADMIN_NAME").unwrap_or_else(|| "Admin User".into()),
                password: lookup("DASHBOARD_ADMIN_PASSWORD").unwrap_or_default(),
            });
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Service tunables derived from this configuration.
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            session_ttl: Duration::from_secs(self.session_ttl_secs),
            pbkdf2_iterations: self.pbkdf2_iterations,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{key} has invalid value `{value}`"))
}
