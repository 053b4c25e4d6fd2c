//! Movie catalog provider abstraction
//!
//! The catalog is a third-party movie metadata service. Providers only
//! translate its responses into our movie shapes; failure handling for UI
//! consumers lives in `services::catalog`.

use crate::{
    error::AppResult,
    models::{Credits, Movie, MovieDetails},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search movies by title. `page` is passed through to the catalog.
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<Vec<Movie>>;

    /// Movies trending this week
    async fn trending_week(&self) -> AppResult<Vec<Movie>>;

    /// Movies currently in theaters
    async fn now_playing(&self) -> AppResult<Vec<Movie>>;

    async fn movie_details(&self, tmdb_id: i64) -> AppResult<MovieDetails>;

    async fn movie_credits(&self, tmdb_id: i64) -> AppResult<Credits>;

    /// Catalog recommendations for a single movie
    async fn recommendations(&self, tmdb_id: i64) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
