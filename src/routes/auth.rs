use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::{AuthUser, RequestId},
    models::{AuthResponse, LoginRequest, RegisterRequest},
    routes::{AppJson, AppState},
    services::users,
};

pub async fn register(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    tracing::info!(request_id = %request_id, "Processing registration");

    let response = users::register(&state.db_pool, &state.token_keys, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = users::login(&state.db_pool, &state.token_keys, request).await?;
    Ok(Json(response))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Value>> {
    let user = users::get_user(&state.db_pool, user.id).await?;
    Ok(Json(json!({ "user": user })))
}
