//! Product repository.

use axum::async_trait;
use sqlx::SqlitePool;

use super::product::{NewProduct, Product, ProductUpdate};
use super::traits::ProductStore;
use crate::{Result, StorefrontError};

/// Repository for product CRUD operations.
#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Create a new ProductRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, image, price, quantity, created_at
             FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, image, price, quantity, created_at
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn create(&self, new_product: &NewProduct) -> Result<Product> {
        let result = sqlx::query(
            "INSERT INTO products (name, description, image, price, quantity)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(&new_product.image)
        .bind(new_product.price)
        .bind(new_product.quantity)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| StorefrontError::NotFound("product".to_string()))
    }

    async fn update(&self, id: i64, update: &ProductUpdate) -> Result<Option<Product>> {
        let result = sqlx::query(
            "UPDATE products SET name = ?, description = ?, image = ?, price = ?, quantity = ?
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.image)
        .bind(update.price)
        .bind(update.quantity)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
