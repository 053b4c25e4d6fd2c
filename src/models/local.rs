use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A rating in the offline cache. There is no owner column: the cache
/// belongs to whichever profile is signed in on the device.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LocalRating {
    pub id: i64,
    pub tmdb_id: i64,
    pub rating: i64,
    pub review: Option<String>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A collection in the offline cache
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LocalCollection {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
