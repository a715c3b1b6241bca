//! Password hashing and verification.
//!
//! Uses Argon2id. The produced PHC string embeds the salt and the cost
//! parameters, so verification never depends on the current configuration.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

use crate::config::AuthConfig;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The configured cost parameters are rejected by Argon2.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),
}

/// Argon2 work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Time cost (iterations).
    pub iterations: u32,
    /// Parallelism (lanes).
    pub parallelism: u32,
}

impl HashCost {
    /// Cost taken from the authentication configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            memory_kib: config.hash_memory_kib,
            iterations: config.hash_iterations,
            parallelism: config.hash_parallelism,
        }
    }
}

impl Default for HashCost {
    /// 64 MB, 3 iterations, 4 lanes.
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Plaintext behind the stand-in hash checked for unknown accounts.
const DUMMY_PASSWORD: &str = "storefront-dummy-password";

/// One-way credential hasher with a fixed work factor.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    dummy_hash: String,
}

impl CredentialHasher {
    /// Create a hasher for the given cost.
    ///
    /// Also derives a stand-in hash at the same cost, so that checking a
    /// password for a missing account costs as much as for a real one.
    pub fn new(cost: HashCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, DUMMY_PASSWORD)?;

        Ok(Self { argon2, dummy_hash })
    }

    /// Stand-in hash computed with this hasher's cost.
    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront::auth::{CredentialHasher, HashCost};
    ///
    /// let hasher = CredentialHasher::new(HashCost::default()).unwrap();
    /// let hash = hasher.hash("my_secure_password").unwrap();
    /// assert!(hash.starts_with("$argon2id$"));
    /// ```
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        hash_with(&self.argon2, plaintext)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed hash is a failed verification, not an error.
    pub fn verify(&self, hash: &str, plaintext: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        // Parameters come from the parsed hash, not from self.
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

fn hash_with(argon2: &Argon2<'_>, plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher").finish_non_exhaustive()
    }
}
