//! Offline cache for the signed-in profile.
//!
//! Mirrors the server's collection, item and rating shapes minus the owner
//! column. Ratings are written here first and this store is what the UI reads.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    db::{create_pool, is_unique_violation, migrate_local},
    error::{AppError, AppResult},
    models::{CollectionItem, LocalCollection, LocalRating, RatingInput},
};

const RATING_COLUMNS: &str =
    "id, tmdb_id, rating, review, title, poster_path, created_at, updated_at";

#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Opens (creating if needed) the cache database and applies its schema
    pub async fn open(database_url: &str) -> AppResult<Self> {
        let pool = create_pool(database_url).await?;
        migrate_local(&pool).await?;
        Ok(Self { pool })
    }

    /// Inserts or updates the rating for a movie, same merge rules as the server
    pub async fn save_rating(&self, input: &RatingInput) -> AppResult<LocalRating> {
        let now = Utc::now();

        let rating = sqlx::query_as::<_, LocalRating>(&format!(
            r#"
            INSERT INTO ratings (tmdb_id, rating, review, title, poster_path, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (tmdb_id) DO UPDATE SET
                rating = excluded.rating,
                review = excluded.review,
                title = COALESCE(excluded.title, ratings.title),
                poster_path = COALESCE(excluded.poster_path, ratings.poster_path),
                updated_at = excluded.updated_at
            RETURNING {}
            "#,
            RATING_COLUMNS
        ))
        .bind(input.tmdb_id)
        .bind(input.rating)
        .bind(&input.review)
        .bind(&input.title)
        .bind(&input.poster_path)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(rating)
    }

    pub async fn get_rating(&self, tmdb_id: i64) -> AppResult<Option<LocalRating>> {
        let rating = sqlx::query_as::<_, LocalRating>(&format!(
            "SELECT {} FROM ratings WHERE tmdb_id = ?",
            RATING_COLUMNS
        ))
        .bind(tmdb_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rating)
    }

    pub async fn list_ratings(&self) -> AppResult<Vec<LocalRating>> {
        let ratings = sqlx::query_as::<_, LocalRating>(&format!(
            "SELECT {} FROM ratings ORDER BY updated_at DESC, id DESC",
            RATING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings)
    }

    /// Most recently inserted rating with at least `min_stars`
    ///
    /// Insertion order is the row id; re-rating a movie does not move it.
    pub async fn latest_rating_at_least(&self, min_stars: i64) -> AppResult<Option<LocalRating>> {
        let rating = sqlx::query_as::<_, LocalRating>(&format!(
            "SELECT {} FROM ratings WHERE rating >= ? ORDER BY id DESC LIMIT 1",
            RATING_COLUMNS
        ))
        .bind(min_stars)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rating)
    }

    pub async fn create_collection(&self, name: &str) -> AppResult<LocalCollection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "Collection name is required".to_string(),
            ));
        }

        let collection = sqlx::query_as::<_, LocalCollection>(
            "INSERT INTO collections (name, created_at) VALUES (?, ?) RETURNING id, name, created_at",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(collection)
    }

    pub async fn list_collections(&self) -> AppResult<Vec<LocalCollection>> {
        let collections = sqlx::query_as::<_, LocalCollection>(
            "SELECT id, name, created_at FROM collections ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Deletes the collection's items, then the collection
    pub async fn delete_collection(&self, collection_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM collection_items WHERE collection_id = ?")
            .bind(collection_id)
            .execute(&self.pool)
            .await?;

        let result = sqlx::query("DELETE FROM collections WHERE id = ?")
            .bind(collection_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Collection not found".to_string()));
        }
        Ok(())
    }

    pub async fn add_item(
        &self,
        collection_id: i64,
        tmdb_id: i64,
        title: &str,
        poster_path: Option<&str>,
    ) -> AppResult<CollectionItem> {
        let item = sqlx::query_as::<_, CollectionItem>(
            r#"
            INSERT INTO collection_items (collection_id, tmdb_id, title, poster_path, added_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, collection_id, tmdb_id, title, poster_path, added_at
            "#,
        )
        .bind(collection_id)
        .bind(tmdb_id)
        .bind(title)
        .bind(poster_path)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Movie already in collection".to_string())
            } else if matches!(&e, sqlx::Error::Database(db) if db.is_foreign_key_violation()) {
                AppError::NotFound("Collection not found".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(item)
    }

    pub async fn list_items(&self, collection_id: i64) -> AppResult<Vec<CollectionItem>> {
        let items = sqlx::query_as::<_, CollectionItem>(
            r#"
            SELECT id, collection_id, tmdb_id, title, poster_path, added_at
            FROM collection_items
            WHERE collection_id = ?
            ORDER BY added_at DESC, id DESC
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn remove_item(&self, collection_id: i64, item_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM collection_items WHERE id = ? AND collection_id = ?")
            .bind(item_id)
            .bind(collection_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item not found".to_string()));
        }
        Ok(())
    }
}
