//! Product endpoints - catalog management and search.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    core::product::{self, ProductUpdate, ProductWithCategory},
    entities,
    errors::Error,
    http::{AppState, UpdateResponse, error::ApiError, error::ApiResult},
};

/// Body of `POST /products`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Display name
    pub name: String,
    /// Unit price, must be positive
    pub price: f64,
    /// Owning category
    pub category_id: i64,
    /// Optional description
    pub description: Option<String>,
    /// Initial stock count, defaults to 0
    #[serde(default)]
    pub stock_quantity: i32,
}

/// Body of `POST /products/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Substring to match against name and description
    pub keyword: String,
}

/// Body of `PUT /products/{id}/stock`.
#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    /// Replacement stock count, must be non-negative
    pub stock_quantity: i32,
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<entities::product::Model>)> {
    let created = product::create_product(
        &state.database,
        request.name,
        request.price,
        request.category_id,
        request.description,
        request.stock_quantity,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> ApiResult<Json<ProductWithCategory>> {
    let product = product::get_product_by_id(&state.database, product_id)
        .await?
        .ok_or_else(|| Error::not_found("product", product_id))?;
    Ok(Json(product))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProductWithCategory>>> {
    Ok(Json(product::get_all_products(&state.database).await?))
}

pub async fn list_products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<Vec<ProductWithCategory>>> {
    Ok(Json(
        product::get_products_by_category(&state.database, category_id).await?,
    ))
}

pub async fn search_products(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<Vec<ProductWithCategory>>> {
    Ok(Json(
        product::search_products(&state.database, &request.keyword).await?,
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(update): Json<ProductUpdate>,
) -> ApiResult<Json<UpdateResponse>> {
    if update.is_empty() {
        return Err(ApiError::bad_request("No update fields provided"));
    }
    let affected_rows = product::update_product(&state.database, product_id, update).await?;
    Ok(Json(UpdateResponse { affected_rows }))
}

pub async fn update_stock(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
    Json(request): Json<UpdateStockRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let affected_rows =
        product::update_stock(&state.database, product_id, request.stock_quantity).await?;
    Ok(Json(UpdateResponse { affected_rows }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let affected = product::delete_product(&state.database, product_id).await?;
    if affected == 0 {
        return Err(Error::not_found("product", product_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
