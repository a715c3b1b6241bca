//! Router configuration for Web API.

use axum::{
    error_handling::HandleErrorLayer,
    middleware,
    routing::{get, post},
    BoxError, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_product, delete_product, get_product, list_products, login, me, register,
    update_product, AppState,
};
use super::error::ApiError;
use super::middleware::require_token;

/// Default per-request deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the main API router, mounted under `/api/v1`.
pub fn create_router(app_state: Arc<AppState>, request_timeout: Duration) -> Router {
    // No authentication required
    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    // Behind the token gate
    let protected_routes = Router::new()
        .route("/users/me", get(me))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.tokens.clone(),
            require_token,
        ));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    let router = Router::new().nest("/api/v1", api_routes);

    with_request_deadline(router, request_timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Abort requests that run past `timeout` with a JSON 408.
fn with_request_deadline<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(timeout),
    )
}

/// Turn errors raised by the middleware stack into API errors.
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::timeout("request timed out")
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        ApiError::internal("internal server error")
    }
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
