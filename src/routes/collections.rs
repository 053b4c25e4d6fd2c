use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{AddItemRequest, Collection, CollectionItem, CreateCollectionRequest},
    routes::{AppJson, AppState},
    services::collections,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Collection>>> {
    let collections = collections::list_collections(&state.db_pool, user.id).await?;
    Ok(Json(collections))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(request): AppJson<CreateCollectionRequest>,
) -> AppResult<(StatusCode, Json<Collection>)> {
    let collection = collections::create_collection(&state.db_pool, user.id, request.name).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    collections::delete_collection(&state.db_pool, user.id, id).await?;
    Ok(Json(json!({ "message": "Collection deleted" })))
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CollectionItem>>> {
    let items = collections::list_items(&state.db_pool, user.id, id).await?;
    Ok(Json(items))
}

pub async fn add_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    AppJson(request): AppJson<AddItemRequest>,
) -> AppResult<(StatusCode, Json<CollectionItem>)> {
    let item = collections::add_item(&state.db_pool, user.id, id, request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((collection_id, item_id)): Path<(i64, i64)>,
) -> AppResult<Json<Value>> {
    collections::delete_item(&state.db_pool, user.id, collection_id, item_id).await?;
    Ok(Json(json!({ "message": "Item removed" })))
}
