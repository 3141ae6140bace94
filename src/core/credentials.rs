//! Salted PBKDF2 password hashing.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::core::DashboardError;

/// Default PBKDF2 iteration count.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 200_000;

const SALT_LEN: usize = 16;

/// Stored password verifier: base64 salt and derived key plus the work factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    /// Base64-encoded random salt.
    pub salt: String,
    /// Base64-encoded PBKDF2-HMAC-SHA256 output.
    pub hash: String,
    /// Iteration count used to derive `hash`.
    #[serde(default = "default_pbkdf2_iterations")]
    pub iterations: u32,
}

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_PBKDF2_ITERATIONS
}

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    ///
    /// Blank or whitespace-only passwords are rejected. Non-blank passwords
    /// are hashed as given, surrounding whitespace included.
    pub fn create(password: &str, iterations: u32) -> Result<Self, DashboardError> {
        if password.trim().is_empty() {
            return Err(DashboardError::Validation("password is required".into()));
        }
        let iterations = iterations.max(1);
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        let key = derive_key(password, &salt, iterations);
        Ok(Self {
            salt: B64.encode(salt),
            hash: B64.encode(key),
            iterations,
        })
    }

    /// Check `password` against this verifier in constant time.
    ///
    /// A corrupt salt or hash never verifies.
    pub fn verify(&self, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        let Ok(salt) = B64.decode(self.salt.as_str()) else {
            return false;
        };
        let Ok(expected) = B64.decode(self.hash.as_str()) else {
            return false;
        };
        let key = derive_key(password, &salt, self.iterations.max(1));
        constant_time_eq(&key, &expected)
    }
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
