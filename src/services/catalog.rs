//! Catalog lookups for UI consumers.
//!
//! Network and parse failures never reach the caller: lists degrade to empty
//! and detail lookups to `None`, with the failure logged.

use crate::{
    error::AppResult,
    models::{Credits, Movie, MovieDetails},
    services::providers::CatalogProvider,
};

fn list_or_empty(
    provider: &dyn CatalogProvider,
    what: &str,
    result: AppResult<Vec<Movie>>,
) -> Vec<Movie> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, provider = provider.name(), what, "Catalog list unavailable");
        Vec::new()
    })
}

fn item_or_none<T>(provider: &dyn CatalogProvider, what: &str, result: AppResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, provider = provider.name(), what, "Catalog lookup failed");
            None
        }
    }
}

/// Searches the catalog; a blank query returns no results without a request
pub async fn search_movies(provider: &dyn CatalogProvider, query: &str, page: u32) -> Vec<Movie> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let result = provider.search_movies(query.trim(), page).await;
    list_or_empty(provider, "search", result)
}

pub async fn trending_week(provider: &dyn CatalogProvider) -> Vec<Movie> {
    let result = provider.trending_week().await;
    list_or_empty(provider, "trending", result)
}

pub async fn now_playing(provider: &dyn CatalogProvider) -> Vec<Movie> {
    let result = provider.now_playing().await;
    list_or_empty(provider, "now_playing", result)
}

pub async fn movie_details(provider: &dyn CatalogProvider, tmdb_id: i64) -> Option<MovieDetails> {
    let result = provider.movie_details(tmdb_id).await;
    item_or_none(provider, "details", result)
}

pub async fn movie_credits(provider: &dyn CatalogProvider, tmdb_id: i64) -> Option<Credits> {
    let result = provider.movie_credits(tmdb_id).await;
    item_or_none(provider, "credits", result)
}
