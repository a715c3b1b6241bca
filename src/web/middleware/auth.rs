//! Bearer-token authentication gate.
//!
//! `require_token` runs in front of every protected route. It verifies the
//! `Authorization: Bearer <token>` header against the [`TokenService`] and
//! inserts an [`AuthUser`] into the request extensions; handlers read it back
//! through the `AuthUser` extractor.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::auth::TokenService;
use crate::web::error::ApiError;

const MISSING_HEADER: &str = "missing authorization header";
const INVALID_HEADER: &str = "invalid authorization header";
const INVALID_TOKEN: &str = "invalid or expired token";

/// The authenticated subject of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// User ID taken from the token subject.
    pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized(MISSING_HEADER))
    }
}

/// Extract the credential from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; the split is on the first space.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, ApiError> {
    let value = header
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized(MISSING_HEADER))?;

    let (scheme, credential) = value
        .split_once(' ')
        .ok_or_else(|| ApiError::unauthorized(INVALID_HEADER))?;

    let credential = credential.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || credential.is_empty() {
        return Err(ApiError::unauthorized(INVALID_HEADER));
    }

    Ok(credential)
}

/// Middleware that rejects requests without a valid session token.
pub async fn require_token(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers().get(AUTHORIZATION))?;

    if !tokens.is_configured() {
        tracing::error!("Token secret is not configured; rejecting protected request");
        return Err(ApiError::configuration("server misconfigured"));
    }

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    let user_id = claims.subject_id().ok_or_else(|| {
        tracing::debug!("Token subject is not a user id");
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}
