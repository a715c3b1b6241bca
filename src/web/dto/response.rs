//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::{Product, User};

/// Message-plus-payload wrapper used by the product endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    /// Outcome message.
    pub message: String,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> MessageResponse<T> {
    /// Create a response carrying data.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl MessageResponse<()> {
    /// Create a response with a message only.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token (JWT).
    pub token: String,
}

/// Public view of a user. The password hash has no counterpart here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Product representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Product ID.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image URL.
    pub image: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Quantity in stock.
    pub quantity: i64,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            image: p.image,
            price: p.price,
            quantity: p.quantity,
            created_at: p.created_at,
        }
    }
}
