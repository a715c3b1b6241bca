//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::db::{NewProduct, ProductUpdate};

/// Login request.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// User registration request.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// First name.
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub first_name: String,
    /// Last name.
    #[validate(
        length(min = 1, max = 100, message = "must be 1-100 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub last_name: String,
    /// Email.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 6, max = 128, message = "must be 6-128 characters"))]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Create product request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Product name.
    #[validate(
        length(min = 1, max = 200, message = "must be 1-200 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: String,
    /// Image URL.
    #[serde(default)]
    #[validate(url(message = "must be a valid URL"))]
    pub image: Option<String>,
    /// Unit price.
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    /// Quantity in stock.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: i64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            description: req.description,
            image: req.image,
            ..NewProduct::new(req.name, req.price, req.quantity)
        }
    }
}

/// Update product request. `id` must match the path.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// Product ID.
    pub id: i64,
    /// Product name.
    #[validate(
        length(min = 1, max = 200, message = "must be 1-200 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: String,
    /// Image URL.
    #[serde(default)]
    #[validate(url(message = "must be a valid URL"))]
    pub image: Option<String>,
    /// Unit price.
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    /// Quantity in stock.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: i64,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(req: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: req.name,
            description: req.description,
            image: req.image,
            price: req.price,
            quantity: req.quantity,
        }
    }
}
