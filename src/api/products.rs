use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    api::{
        error::{ApiError, ApiResult},
        AppState,
    },
    models::{CreateProductRequest, Product, UpdateProductRequest},
};

/// GET /api/products - List the catalog, sorted by name
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.store.list_products().await?;
    Ok(Json(products))
}

/// POST /api/products - Register a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    req.validate().map_err(ApiError::BadRequest)?;

    let product = Product::new(req.name, req.link, req.description, req.external_id);
    state.store.insert_product(&product).await?;

    tracing::info!("Product created: id={}, name={}", product.id, product.name);
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products - Replace all fields of an existing product
pub async fn update_product(
    State(state): State<AppState>,
    Json(req): Json<UpdateProductRequest>,
) -> ApiResult<Json<Value>> {
    req.validate().map_err(ApiError::BadRequest)?;

    state.store.update_product(&req.into_product()).await?;
    Ok(Json(json!({"ok": true})))
}

#[derive(Debug, Deserialize)]
pub struct DeleteProductQuery {
    pub id: Option<String>,
}

/// DELETE /api/products?id=... - Remove a product from the catalog
pub async fn delete_product(
    State(state): State<AppState>,
    Query(query): Query<DeleteProductQuery>,
) -> ApiResult<Json<Value>> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Product id is required".to_string()))?;

    state.store.delete_product(&id).await?;

    tracing::info!("Product deleted: id={}", id);
    Ok(Json(json!({"ok": true})))
}
