//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{self, CredentialHasher, HashCost, RegistrationRequest, TokenService};
use crate::config::Config;
use crate::db::{ProductRepository, ProductStore, UserRepository, UserStore};
use crate::web::dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account store.
    pub users: Arc<dyn UserStore>,
    /// Product store.
    pub products: Arc<dyn ProductStore>,
    /// Password hasher.
    pub hasher: CredentialHasher,
    /// Session token service.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
        hasher: CredentialHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            products,
            hasher,
            tokens: Arc::new(tokens),
        }
    }

    /// Build the state from configuration and an open database.
    pub fn from_config(config: &Config, db: &Database) -> crate::Result<Self> {
        let hasher = CredentialHasher::new(HashCost::from_config(&config.auth))
            .map_err(|e| crate::StorefrontError::Config(e.to_string()))?;

        Ok(Self::new(
            Arc::new(UserRepository::new(db.pool().clone())),
            Arc::new(ProductRepository::new(db.pool().clone())),
            hasher,
            TokenService::from_config(&config.auth),
        ))
    }
}

/// POST /api/v1/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let request = RegistrationRequest::new(req.first_name, req.last_name, req.email, req.password);
    let user = auth::register(state.users.as_ref(), &state.hasher, request).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/v1/login - Exchange credentials for a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = auth::login(
        state.users.as_ref(),
        &state.hasher,
        &state.tokens,
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(LoginResponse { token }))
}

/// GET /api/v1/users/me - Profile of the authenticated user.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .get_by_id(auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(UserResponse::from(user)))
}
