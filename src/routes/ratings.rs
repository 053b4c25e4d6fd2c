use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{Rating, RatingRequest},
    routes::{AppJson, AppState},
    services::ratings,
};

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Rating>>> {
    let ratings = ratings::list_ratings(&state.db_pool, user.id).await?;
    Ok(Json(ratings))
}

/// Creates the caller's rating for a movie or replaces the existing one
pub async fn upsert(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    AppJson(request): AppJson<RatingRequest>,
) -> AppResult<Json<Rating>> {
    let input = request.validate()?;
    let rating = ratings::upsert_rating(&state.db_pool, user.id, input).await?;
    Ok(Json(rating))
}

pub async fn get_one(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tmdb_id): Path<i64>,
) -> AppResult<Json<Rating>> {
    let rating = ratings::get_rating(&state.db_pool, user.id, tmdb_id).await?;
    Ok(Json(rating))
}
