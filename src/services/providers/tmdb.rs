//! TMDB (The Movie Database) catalog provider
//!
//! All endpoints are plain GETs authenticated with the `api_key` query
//! parameter. List endpoints return a paged envelope of which only the
//! requested page's results are used.

use crate::{
    error::{AppError, AppResult},
    models::{Credits, Movie, MovieDetails, Paged},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let parsed = response.json::<T>().await?;
        tracing::debug!(path = %path, provider = "tmdb", "Catalog request succeeded");
        Ok(parsed)
    }

    async fn get_movies(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Vec<Movie>> {
        let paged: Paged<Movie> = self.get(path, params).await?;
        Ok(paged.results)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<Vec<Movie>> {
        let page = page.max(1).to_string();
        self.get_movies("/search/movie", &[("query", query), ("page", page.as_str())])
            .await
    }

    async fn trending_week(&self) -> AppResult<Vec<Movie>> {
        self.get_movies("/trending/movie/week", &[]).await
    }

    async fn now_playing(&self) -> AppResult<Vec<Movie>> {
        self.get_movies("/movie/now_playing", &[]).await
    }

    async fn movie_details(&self, tmdb_id: i64) -> AppResult<MovieDetails> {
        self.get(&format!("/movie/{}", tmdb_id), &[]).await
    }

    async fn movie_credits(&self, tmdb_id: i64) -> AppResult<Credits> {
        self.get(&format!("/movie/{}/credits", tmdb_id), &[]).await
    }

    async fn recommendations(&self, tmdb_id: i64) -> AppResult<Vec<Movie>> {
        self.get_movies(&format!("/movie/{}/recommendations", tmdb_id), &[])
            .await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
