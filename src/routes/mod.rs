use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware, require_auth},
    services::TokenKeys,
};

pub mod auth;
pub mod collections;
mod json;
pub mod ratings;

pub use json::AppJson;

/// Shared handler state: the database pool and the token keys
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub token_keys: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, token_keys: TokenKeys) -> Self {
        Self {
            db_pool,
            token_keys: Arc::new(token_keys),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Routes under /api
fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/collections",
            get(collections::list).post(collections::create),
        )
        .route("/collections/:id", delete(collections::remove))
        .route(
            "/collections/:id/items",
            get(collections::list_items).post(collections::add_item),
        )
        .route(
            "/collections/:id/items/:item_id",
            delete(collections::remove_item),
        )
        .route("/ratings", get(ratings::list).post(ratings::upsert))
        .route("/ratings/:tmdb_id", get(ratings::get_one))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    public.merge(protected)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
