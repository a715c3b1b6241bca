//! API handlers.

pub mod auth;
pub mod product;

pub use auth::*;
pub use product::*;
