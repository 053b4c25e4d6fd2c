//! Device-side core: offline cache, server sync and recommendations.

use std::sync::Arc;

use crate::{
    config::ClientConfig,
    error::AppResult,
    models::{LocalRating, Movie, RatingRequest},
    services::{catalog, providers::CatalogProvider, recommendations, TmdbProvider},
};

pub mod local_store;
pub mod sync;

pub use local_store::LocalStore;
pub use sync::ApiClient;

/// Everything a UI shell needs: the local cache, the server client and the
/// movie catalog
#[derive(Clone)]
pub struct ClientContext {
    pub store: LocalStore,
    pub api: ApiClient,
    pub catalog: Arc<dyn CatalogProvider>,
}

impl ClientContext {
    pub fn new(store: LocalStore, api: ApiClient, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self { store, api, catalog }
    }

    pub async fn from_config(config: &ClientConfig) -> AppResult<Self> {
        let store = LocalStore::open(&config.local_database_url).await?;
        let api = ApiClient::new(config.api_base_url.clone());
        let catalog = Arc::new(TmdbProvider::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
        ));
        Ok(Self::new(store, api, catalog))
    }

    /// Saves a rating locally, then mirrors it to the server when signed in
    ///
    /// The local write is the only one that can fail the call. Sync errors
    /// are logged and dropped.
    pub async fn rate_movie(&self, request: RatingRequest) -> AppResult<LocalRating> {
        let input = request.validate()?;
        let saved = self.store.save_rating(&input).await?;

        match self.api.push_rating(&input).await {
            Ok(Some(_)) => tracing::debug!(tmdb_id = input.tmdb_id, "Rating synced"),
            Ok(None) => tracing::debug!(tmdb_id = input.tmdb_id, "Not signed in, rating kept local"),
            Err(e) => tracing::warn!(error = %e, tmdb_id = input.tmdb_id, "Rating sync failed"),
        }

        Ok(saved)
    }

    pub async fn recommendations(&self) -> recommendations::RecommendationList {
        recommendations::select_recommendations(&self.store, self.catalog.as_ref()).await
    }

    pub async fn search(&self, query: &str, page: u32) -> Vec<Movie> {
        catalog::search_movies(self.catalog.as_ref(), query, page).await
    }

    pub async fn now_playing(&self) -> Vec<Movie> {
        catalog::now_playing(self.catalog.as_ref()).await
    }
}
