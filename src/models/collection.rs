use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named, user-owned list of movies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Collection {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Number of items currently in the collection
    #[sqlx(default)]
    #[serde(default)]
    pub item_count: i64,
}

/// A movie saved into a collection
///
/// Shared by the server and the offline cache, which store the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CollectionItem {
    pub id: i64,
    pub collection_id: i64,
    pub tmdb_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCollectionRequest {
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub tmdb_id: Option<i64>,
    pub title: Option<String>,
    pub poster_path: Option<String>,
}
