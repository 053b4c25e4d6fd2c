use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, AppResult};

/// Lowest accepted star value
pub const MIN_STARS: i64 = 1;
/// Highest accepted star value
pub const MAX_STARS: i64 = 5;

/// A user's star rating for one movie. Unique per (user_id, tmdb_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub tmdb_id: i64,
    pub rating: i64,
    pub review: Option<String>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RatingRequest {
    pub tmdb_id: Option<i64>,
    pub rating: Option<i64>,
    pub review: Option<String>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
}

/// A rating request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct RatingInput {
    pub tmdb_id: i64,
    pub rating: i64,
    pub review: Option<String>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
}

impl RatingRequest {
    pub fn validate(self) -> AppResult<RatingInput> {
        let tmdb_id = self
            .tmdb_id
            .ok_or_else(|| AppError::InvalidInput("tmdb_id is required".to_string()))?;
        let rating = self
            .rating
            .ok_or_else(|| AppError::InvalidInput("rating is required".to_string()))?;

        if !(MIN_STARS..=MAX_STARS).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "rating must be between {} and {}",
                MIN_STARS, MAX_STARS
            )));
        }

        Ok(RatingInput {
            tmdb_id,
            rating,
            review: self.review,
            title: self.title,
            poster_path: self.poster_path,
        })
    }
}
