use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::AppResult;

/// Creates a SQLite connection pool
///
/// The database file is created if it does not exist and foreign keys are
/// enforced on every connection. In-memory databases get a single, never
/// recycled connection since each connection would otherwise see its own
/// empty database.
pub async fn create_pool(database_url: &str) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

/// Applies the server schema
pub async fn migrate_server(pool: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!("./migrations/server").run(pool).await?;
    tracing::info!("Server schema up to date");
    Ok(())
}

/// Applies the offline cache schema
pub async fn migrate_local(pool: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!("./migrations/local").run(pool).await?;
    tracing::info!("Local cache schema up to date");
    Ok(())
}

/// Returns true when the error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_keeps_schema() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        migrate_server(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
