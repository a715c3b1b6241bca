//! Authentication module for Storefront.
//!
//! This module provides password hashing, session token issuance and
//! verification, user registration, and the login flow.

mod login;
mod password;
pub mod registration;
mod token;

pub use login::{login, LoginError};
pub use password::{CredentialHasher, HashCost, PasswordError};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use token::{
    issue_token, verify_token, Claims, TokenError, TokenService, SIGNING_ALGORITHM,
};
