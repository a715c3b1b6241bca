//! Middleware for Web API.

pub mod auth;

pub use auth::{bearer_token, require_token, AuthUser};
