//! Store traits.
//!
//! The auth core and the web handlers depend on these traits rather than on
//! a concrete database, so alternative backends (or test doubles) can be
//! plugged into `AppState`.

use axum::async_trait;

use crate::db::{NewProduct, NewUser, Product, ProductUpdate, User};
use crate::Result;

/// Account store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an account by its email (case-insensitive).
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up an account by its internal id.
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Persist a new account and return its id.
    ///
    /// Fails with `StorefrontError::Duplicate` if the email is taken.
    async fn create(&self, new_user: &NewUser) -> Result<i64>;
}

/// Product store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// List all products ordered by id.
    async fn list(&self) -> Result<Vec<Product>>;

    /// Get a product by id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Create a product and return it with its assigned id.
    async fn create(&self, new_product: &NewProduct) -> Result<Product>;

    /// Replace a product's fields. Returns `None` if it does not exist.
    async fn update(&self, id: i64, update: &ProductUpdate) -> Result<Option<Product>>;

    /// Delete a product. Returns `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool>;
}
