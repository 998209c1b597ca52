//! Order endpoints - placement, reads, status changes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    core::order::{self, OrderHistory, OrderItemInput, OrderItemWithProduct, OrderWithUser},
    entities,
    errors::Error,
    http::{AppState, UpdateResponse, error::ApiResult},
};

/// Body of `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// The ordering user
    pub user_id: i64,
    /// Order lines; must be non-empty
    pub items: Vec<OrderItemInput>,
    /// Delivery address
    pub shipping_address: String,
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    /// Replacement status string
    pub status: String,
}

/// Body of `GET /orders/{id}/total`.
#[derive(Debug, Serialize)]
pub struct OrderTotalResponse {
    /// The order in question
    pub order_id: i64,
    /// Sum of its item subtotals
    pub total_amount: f64,
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<entities::order::Model>)> {
    let created = order::place_order(
        &state.database,
        request.user_id,
        &request.items,
        request.shipping_address,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<Json<OrderWithUser>> {
    let order = order::get_order_by_id(&state.database, order_id)
        .await?
        .ok_or_else(|| Error::not_found("order", order_id))?;
    Ok(Json(order))
}

pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderWithUser>>> {
    Ok(Json(order::get_all_orders(&state.database).await?))
}

pub async fn list_orders_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<OrderWithUser>>> {
    Ok(Json(
        order::get_orders_by_user(&state.database, user_id).await?,
    ))
}

pub async fn get_user_order_history(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<OrderHistory>>> {
    Ok(Json(
        order::get_user_order_history(&state.database, user_id).await?,
    ))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let affected_rows =
        order::update_order_status(&state.database, order_id, &request.status).await?;
    Ok(Json(UpdateResponse { affected_rows }))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let affected = order::delete_order(&state.database, order_id).await?;
    if affected == 0 {
        return Err(Error::not_found("order", order_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_order_items(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<Json<Vec<OrderItemWithProduct>>> {
    Ok(Json(order::get_order_items(&state.database, order_id).await?))
}

pub async fn get_order_total(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> ApiResult<Json<OrderTotalResponse>> {
    let total_amount = order::get_order_total(&state.database, order_id).await?;
    Ok(Json(OrderTotalResponse {
        order_id,
        total_amount,
    }))
}
