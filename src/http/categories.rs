//! Category endpoints - tree management and listings.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    core::category::{self, CategoryUpdate},
    entities,
    errors::Error,
    http::{AppState, UpdateResponse, error::ApiError, error::ApiResult},
};

/// Body of `POST /categories`.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name
    pub name: String,
    /// Optional parent category; omit for a root category
    pub parent_id: Option<i64>,
    /// Optional description
    pub description: Option<String>,
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<entities::category::Model>)> {
    let created = category::create_category(
        &state.database,
        request.name,
        request.parent_id,
        request.description,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<Json<entities::category::Model>> {
    let category = category::get_category_by_id(&state.database, category_id)
        .await?
        .ok_or_else(|| Error::not_found("category", category_id))?;
    Ok(Json(category))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<entities::category::Model>>> {
    Ok(Json(category::get_all_categories(&state.database).await?))
}

pub async fn list_root_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<entities::category::Model>>> {
    Ok(Json(category::get_root_categories(&state.database).await?))
}

pub async fn list_subcategories(
    State(state): State<AppState>,
    Path(parent_id): Path<i64>,
) -> ApiResult<Json<Vec<entities::category::Model>>> {
    Ok(Json(
        category::get_subcategories(&state.database, parent_id).await?,
    ))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(update): Json<CategoryUpdate>,
) -> ApiResult<Json<UpdateResponse>> {
    if update.is_empty() {
        return Err(ApiError::bad_request("No update fields provided"));
    }
    let affected_rows = category::update_category(&state.database, category_id, update).await?;
    Ok(Json(UpdateResponse { affected_rows }))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let affected = category::delete_category(&state.database, category_id).await?;
    if affected == 0 {
        return Err(Error::not_found("category", category_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
