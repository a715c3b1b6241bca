//! Credential verification flow.
//!
//! Looks the account up by email, checks the password and issues a session
//! token. The caller cannot tell an unknown email from a wrong password.

use thiserror::Error;
use tracing::{debug, info};

use crate::auth::{CredentialHasher, TokenError, TokenService};
use crate::db::UserStore;

/// Login errors.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The token service cannot sign (no secret configured).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Store or hashing failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for LoginError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::MissingSecret => LoginError::Configuration(e.to_string()),
            other => LoginError::Internal(other.to_string()),
        }
    }
}

/// Hash to check the password against, and whether it belongs to a real
/// account. Unknown accounts get the hasher's stand-in hash.
fn hash_to_check(hasher: &CredentialHasher, stored: Option<String>) -> (String, bool) {
    match stored {
        Some(hash) => (hash, true),
        None => (hasher.dummy_hash().to_string(), false),
    }
}

/// Verify `password` on the blocking pool.
async fn verify_off_reactor(
    hasher: &CredentialHasher,
    stored: Option<String>,
    password: &str,
) -> Result<bool, LoginError> {
    let (hash, is_account) = hash_to_check(hasher, stored);
    let hasher = hasher.clone();
    let password = password.to_string();

    tokio::task::spawn_blocking(move || hasher.verify(&hash, &password) && is_account)
        .await
        .map_err(|e| LoginError::Internal(e.to_string()))
}

/// Authenticate a user by email and password and return a signed token.
pub async fn login(
    users: &dyn UserStore,
    hasher: &CredentialHasher,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<String, LoginError> {
    if !tokens.is_configured() {
        return Err(LoginError::Configuration(
            TokenError::MissingSecret.to_string(),
        ));
    }

    let user = users
        .get_by_email(email)
        .await
        .map_err(|e| LoginError::Internal(e.to_string()))?;

    let (user_id, stored_hash) = match user {
        Some(user) => (Some(user.id), Some(user.password)),
        None => (None, None),
    };

    let verified = verify_off_reactor(hasher, stored_hash, password).await?;

    let user_id = match (verified, user_id) {
        (true, Some(id)) => id,
        _ => {
            debug!("Login rejected");
            return Err(LoginError::InvalidCredentials);
        }
    };

    let token = tokens.issue(user_id)?;
    info!(user_id, "User logged in");

    Ok(token)
}
