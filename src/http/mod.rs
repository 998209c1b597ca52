//! HTTP boundary - axum router, shared state, and request handlers.
//!
//! This module wires every REST endpoint to its core operation. Handlers do no
//! business logic of their own: they translate paths and JSON bodies into core
//! calls and map results and errors onto status codes (201 on create, 204 on
//! delete, 404 for zero-row lookups and deletes, 400 for rejected input, 500
//! for persistence failures).

/// Category endpoints
pub mod categories;
/// API error type and result alias
pub mod error;
/// Order endpoints
pub mod orders;
/// Product endpoints
pub mod products;
/// User endpoints
pub mod users;

use axum::{
    Json, Router,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state available to all request handlers.
/// Holds the pooled database connection; handlers check connections out per
/// statement and release them on every exit path.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for all persistence operations
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` around the given database handle.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Response body for update endpoints.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// How many rows the statement changed
    pub affected_rows: u64,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving
    pub status: &'static str,
    /// Service identifier
    pub service: &'static str,
}

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    /// Service identifier
    pub message: &'static str,
    /// Crate version
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "storefront API",
    })
}

async fn api_root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "storefront API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the axum router with all endpoints wired to the given state.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_root))
        .route("/health", get(health_check))
        // Users
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/password", put(users::change_password))
        .route("/users/username/:username", get(users::get_user_by_username))
        .route("/users/email/:email", get(users::get_user_by_email))
        // Categories
        .route(
            "/categories",
            post(categories::create_category).get(categories::list_categories),
        )
        .route("/categories/root", get(categories::list_root_categories))
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/categories/:parent_id/children",
            get(categories::list_subcategories),
        )
        // Products
        .route(
            "/products",
            post(products::create_product).get(products::list_products),
        )
        .route("/products/search", post(products::search_products))
        .route(
            "/products/category/:id",
            get(products::list_products_by_category),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/:id/stock", put(products::update_stock))
        // Orders
        .route(
            "/orders",
            post(orders::create_order).get(orders::list_orders),
        )
        .route("/orders/user/:id", get(orders::list_orders_by_user))
        .route(
            "/orders/user/:id/history",
            get(orders::get_user_order_history),
        )
        .route(
            "/orders/:id",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route("/orders/:id/status", put(orders::update_order_status))
        .route("/orders/:id/items", get(orders::get_order_items))
        .route("/orders/:id/total", get(orders::get_order_total))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
