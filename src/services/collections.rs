use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    db::is_unique_violation,
    error::{AppError, AppResult},
    models::{AddItemRequest, Collection, CollectionItem},
};

const COLLECTION_COLUMNS: &str = r#"
    c.id, c.user_id, c.name, c.created_at,
    (SELECT COUNT(*) FROM collection_items i WHERE i.collection_id = c.id) AS item_count
"#;

/// Looks up a collection by id, scoped to its owner
///
/// A collection owned by someone else is reported exactly like a missing one.
pub async fn find_owned(
    pool: &SqlitePool,
    user_id: i64,
    collection_id: i64,
) -> AppResult<Collection> {
    sqlx::query_as::<_, Collection>(&format!(
        "SELECT {} FROM collections c WHERE c.id = ? AND c.user_id = ?",
        COLLECTION_COLUMNS
    ))
    .bind(collection_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))
}

/// Lists the caller's collections, newest first
pub async fn list_collections(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Collection>> {
    let collections = sqlx::query_as::<_, Collection>(&format!(
        "SELECT {} FROM collections c WHERE c.user_id = ? ORDER BY c.created_at DESC, c.id DESC",
        COLLECTION_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(collections)
}

pub async fn create_collection(
    pool: &SqlitePool,
    user_id: i64,
    name: Option<String>,
) -> AppResult<Collection> {
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Collection name is required".to_string()))?;

    let collection = sqlx::query_as::<_, Collection>(
        r#"
        INSERT INTO collections (user_id, name, created_at)
        VALUES (?, ?, ?)
        RETURNING id, user_id, name, created_at, 0 AS item_count
        "#,
    )
    .bind(user_id)
    .bind(&name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id, collection_id = collection.id, "Collection created");
    Ok(collection)
}

/// Deletes an owned collection and its items
///
/// Items go first, then the collection. The two statements are not wrapped in
/// a transaction; the schema's cascade covers anything left behind.
pub async fn delete_collection(
    pool: &SqlitePool,
    user_id: i64,
    collection_id: i64,
) -> AppResult<()> {
    find_owned(pool, user_id, collection_id).await?;

    let items = sqlx::query("DELETE FROM collection_items WHERE collection_id = ?")
        .bind(collection_id)
        .execute(pool)
        .await?;

    sqlx::query("DELETE FROM collections WHERE id = ? AND user_id = ?")
        .bind(collection_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    tracing::info!(
        user_id,
        collection_id,
        items_removed = items.rows_affected(),
        "Collection deleted"
    );
    Ok(())
}

/// Lists the items of an owned collection, newest first
pub async fn list_items(
    pool: &SqlitePool,
    user_id: i64,
    collection_id: i64,
) -> AppResult<Vec<CollectionItem>> {
    find_owned(pool, user_id, collection_id).await?;

    let items = sqlx::query_as::<_, CollectionItem>(
        r#"
        SELECT id, collection_id, tmdb_id, title, poster_path, added_at
        FROM collection_items
        WHERE collection_id = ?
        ORDER BY added_at DESC, id DESC
        "#,
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

pub async fn add_item(
    pool: &SqlitePool,
    user_id: i64,
    collection_id: i64,
    request: AddItemRequest,
) -> AppResult<CollectionItem> {
    let tmdb_id = request
        .tmdb_id
        .ok_or_else(|| AppError::InvalidInput("tmdb_id is required".to_string()))?;
    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("title is required".to_string()))?;

    find_owned(pool, user_id, collection_id).await?;

    let item = sqlx::query_as::<_, CollectionItem>(
        r#"
        INSERT INTO collection_items (collection_id, tmdb_id, title, poster_path, added_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, collection_id, tmdb_id, title, poster_path, added_at
        "#,
    )
    .bind(collection_id)
    .bind(tmdb_id)
    .bind(&title)
    .bind(&request.poster_path)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Movie already in collection".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::debug!(collection_id, tmdb_id, "Item added to collection");
    Ok(item)
}

/// Removes an item, provided the collection is the caller's and the item
/// belongs to that collection
pub async fn delete_item(
    pool: &SqlitePool,
    user_id: i64,
    collection_id: i64,
    item_id: i64,
) -> AppResult<()> {
    find_owned(pool, user_id, collection_id).await?;

    let result = sqlx::query("DELETE FROM collection_items WHERE id = ? AND collection_id = ?")
        .bind(item_id)
        .bind(collection_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Item not found".to_string()));
    }

    Ok(())
}
