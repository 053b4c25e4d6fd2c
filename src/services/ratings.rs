use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{Rating, RatingInput},
};

const RATING_COLUMNS: &str =
    "id, user_id, tmdb_id, rating, review, title, poster_path, created_at, updated_at";

/// Lists the caller's ratings, most recently updated first
pub async fn list_ratings(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Rating>> {
    let ratings = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {} FROM ratings WHERE user_id = ? ORDER BY updated_at DESC, id DESC",
        RATING_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(ratings)
}

pub async fn get_rating(pool: &SqlitePool, user_id: i64, tmdb_id: i64) -> AppResult<Rating> {
    sqlx::query_as::<_, Rating>(&format!(
        "SELECT {} FROM ratings WHERE user_id = ? AND tmdb_id = ?",
        RATING_COLUMNS
    ))
    .bind(user_id)
    .bind(tmdb_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Rating not found".to_string()))
}

/// Inserts or updates the caller's rating for a movie
///
/// On update the star value and review are replaced, while title and poster
/// keep their stored values when the new request leaves them out.
pub async fn upsert_rating(
    pool: &SqlitePool,
    user_id: i64,
    input: RatingInput,
) -> AppResult<Rating> {
    let now = Utc::now();

    let rating = sqlx::query_as::<_, Rating>(&format!(
        r#"
        INSERT INTO ratings (user_id, tmdb_id, rating, review, title, poster_path, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id, tmdb_id) DO UPDATE SET
            rating = excluded.rating,
            review = excluded.review,
            title = COALESCE(excluded.title, ratings.title),
            poster_path = COALESCE(excluded.poster_path, ratings.poster_path),
            updated_at = excluded.updated_at
        RETURNING {}
        "#,
        RATING_COLUMNS
    ))
    .bind(user_id)
    .bind(input.tmdb_id)
    .bind(input.rating)
    .bind(&input.review)
    .bind(&input.title)
    .bind(&input.poster_path)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        user_id,
        tmdb_id = rating.tmdb_id,
        stars = rating.rating,
        "Rating saved"
    );
    Ok(rating)
}
