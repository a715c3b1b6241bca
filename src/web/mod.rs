//! Web API module for Storefront.
//!
//! REST endpoints for registration, login and product management, with a
//! bearer-token gate in front of the protected routes.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
