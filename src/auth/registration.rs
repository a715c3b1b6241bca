//! User registration.

use thiserror::Error;
use tracing::info;

use crate::auth::{CredentialHasher, PasswordError};
use crate::db::{NewUser, User, UserStore};
use crate::StorefrontError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// An account with this email already exists.
    #[error("user with email {0} already exists")]
    EmailExists(String),

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// The hashing task could not complete.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Registration request data.
#[derive(Clone)]
pub struct RegistrationRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Register a new user.
///
/// This function:
/// 1. Checks if the email is already taken
/// 2. Hashes the password on the blocking pool
/// 3. Creates the user in the store
///
/// A unique-constraint failure on insert (a concurrent registration with
/// the same email) is reported as [`RegistrationError::EmailExists`].
pub async fn register(
    users: &dyn UserStore,
    hasher: &CredentialHasher,
    request: RegistrationRequest,
) -> Result<User, RegistrationError> {
    let existing = users
        .get_by_email(&request.email)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?;
    if existing.is_some() {
        return Err(RegistrationError::EmailExists(request.email));
    }

    let hasher = hasher.clone();
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| RegistrationError::Internal(e.to_string()))??;

    let new_user = NewUser::new(
        request.first_name,
        request.last_name,
        request.email.clone(),
        password_hash,
    );

    let id = match users.create(&new_user).await {
        Ok(id) => id,
        Err(StorefrontError::Duplicate(_)) => {
            return Err(RegistrationError::EmailExists(request.email));
        }
        Err(e) => return Err(RegistrationError::Database(e.to_string())),
    };

    let user = users
        .get_by_id(id)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
        .ok_or_else(|| RegistrationError::Database("created user not found".to_string()))?;

    info!(user_id = user.id, "New user registered");

    Ok(user)
}
