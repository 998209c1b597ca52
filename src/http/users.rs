//! User endpoints - registration, lookups, partial update, password change.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    core::user::{self, UserUpdate},
    entities,
    errors::Error,
    http::{AppState, UpdateResponse, error::ApiError, error::ApiResult},
};

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Login name, unique
    pub username: String,
    /// Contact email, unique
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Optional display name
    pub full_name: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
}

/// Body of `PUT /users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// Replacement password
    pub new_password: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<entities::user::Model>)> {
    let created = user::create_user(
        &state.database,
        request.username,
        request.email,
        request.password,
        request.full_name,
        request.phone,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<entities::user::Model>> {
    let user = user::get_user_by_id(&state.database, user_id)
        .await?
        .ok_or_else(|| Error::not_found("user", user_id))?;
    Ok(Json(user))
}

pub async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<entities::user::Model>>> {
    Ok(Json(user::get_all_users(&state.database).await?))
}

pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<entities::user::Model>> {
    let user = user::get_user_by_username(&state.database, &username)
        .await?
        .ok_or_else(|| Error::not_found("user", username))?;
    Ok(Json(user))
}

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<entities::user::Model>> {
    let user = user::get_user_by_email(&state.database, &email)
        .await?
        .ok_or_else(|| Error::not_found("user", email))?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<UpdateResponse>> {
    if update.is_empty() {
        return Err(ApiError::bad_request("No update fields provided"));
    }
    let affected_rows = user::update_user(&state.database, user_id, update).await?;
    Ok(Json(UpdateResponse { affected_rows }))
}

pub async fn change_password(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let affected_rows =
        user::change_password(&state.database, user_id, &request.new_password).await?;
    Ok(Json(UpdateResponse { affected_rows }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let affected = user::delete_user(&state.database, user_id).await?;
    if affected == 0 {
        return Err(Error::not_found("user", user_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
