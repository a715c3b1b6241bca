//! Product handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use super::AppState;
use crate::db::{NewProduct, ProductUpdate};
use crate::web::dto::{
    CreateProductRequest, MessageResponse, ProductResponse, UpdateProductRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_request("invalid id"))
}

/// GET /api/v1/products - List all products.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse<Vec<ProductResponse>>>, ApiError> {
    let products = state.products.list().await?;
    let data = products.into_iter().map(ProductResponse::from).collect();

    Ok(Json(MessageResponse::new("success", data)))
}

/// GET /api/v1/products/:id - Get a product.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse<ProductResponse>>, ApiError> {
    let id = parse_id(&id)?;
    let product = state
        .products
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("product not found"))?;

    Ok(Json(MessageResponse::new("success", product.into())))
}

/// POST /api/v1/products - Create a product.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<MessageResponse<ProductResponse>>), ApiError> {
    let product = state.products.create(&NewProduct::from(req)).await?;
    info!(
        user_id = auth_user.user_id,
        product_id = product.id,
        "Product created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("product created", product.into())),
    ))
}

/// PUT /api/v1/products/:id - Replace a product.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<MessageResponse<ProductResponse>>, ApiError> {
    let id = parse_id(&id)?;
    if req.id != id {
        return Err(ApiError::bad_request("id mismatch"));
    }

    let product = state
        .products
        .update(id, &ProductUpdate::from(req))
        .await?
        .ok_or_else(|| ApiError::not_found("product not found"))?;
    info!(user_id = auth_user.user_id, product_id = id, "Product updated");

    Ok(Json(MessageResponse::new("product updated", product.into())))
}

/// DELETE /api/v1/products/:id - Delete a product.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse<()>>, ApiError> {
    let id = parse_id(&id)?;
    if !state.products.delete(id).await? {
        return Err(ApiError::not_found("product not found"));
    }
    info!(user_id = auth_user.user_id, product_id = id, "Product deleted");

    Ok(Json(MessageResponse::message("product deleted")))
}
