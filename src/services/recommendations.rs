use serde::Serialize;

use crate::{
    client::LocalStore,
    models::{LocalRating, Movie},
    services::{catalog, providers::CatalogProvider},
};

/// Ratings at or above this many stars count as "liked"
pub const LIKED_THRESHOLD: i64 = 4;

pub const TRENDING_TITLE: &str = "Trending this week";

/// Where a recommendation list came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Catalog recommendations for a movie the user liked
    BasedOn { tmdb_id: i64, title: String },
    Trending,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationList {
    /// Heading shown above the list
    pub title: String,
    pub source: RecommendationSource,
    pub movies: Vec<Movie>,
}

impl RecommendationList {
    fn trending(movies: Vec<Movie>) -> Self {
        Self {
            title: TRENDING_TITLE.to_string(),
            source: RecommendationSource::Trending,
            movies,
        }
    }
}

fn display_title(rating: &LocalRating) -> String {
    rating
        .title
        .clone()
        .unwrap_or_else(|| format!("movie #{}", rating.tmdb_id))
}

/// Picks the personalized list when possible, trending otherwise
///
/// Uses the most recently inserted local rating of at least
/// [`LIKED_THRESHOLD`] stars. A failed or empty recommendations call, or a
/// failed cache read, falls back to trending. Nothing is cached between calls.
pub async fn select_recommendations(
    store: &LocalStore,
    provider: &dyn CatalogProvider,
) -> RecommendationList {
    let liked = match store.latest_rating_at_least(LIKED_THRESHOLD).await {
        Ok(liked) => liked,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read local ratings");
            None
        }
    };

    if let Some(rating) = liked {
        match provider.recommendations(rating.tmdb_id).await {
            Ok(movies) if !movies.is_empty() => {
                let title = display_title(&rating);
                tracing::debug!(
                    tmdb_id = rating.tmdb_id,
                    count = movies.len(),
                    "Using personalized recommendations"
                );
                return RecommendationList {
                    title: format!("Because you liked {}", title),
                    source: RecommendationSource::BasedOn {
                        tmdb_id: rating.tmdb_id,
                        title,
                    },
                    movies,
                };
            }
            Ok(_) => {
                tracing::debug!(tmdb_id = rating.tmdb_id, "No recommendations, using trending");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    tmdb_id = rating.tmdb_id,
                    "Recommendations failed, using trending"
                );
            }
        }
    }

    RecommendationList::trending(catalog::trending_week(provider).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::RatingInput;
    use crate::services::providers::MockCatalogProvider;
    use mockall::predicate::eq;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: None,
        }
    }

    async fn store_with(ratings: &[(i64, i64, &str)]) -> LocalStore {
        let store = LocalStore::open("sqlite::memory:").await.unwrap();
        for (tmdb_id, stars, title) in ratings {
            store
                .save_rating(&RatingInput {
                    tmdb_id: *tmdb_id,
                    rating: *stars,
                    review: None,
                    title: Some(title.to_string()),
                    poster_path: None,
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_no_liked_rating_returns_trending() {
        let store = store_with(&[(348, 3, "Alien")]).await;

        let mut provider = MockCatalogProvider::new();
        provider.expect_recommendations().never();
        provider
            .expect_trending_week()
            .times(1)
            .returning(|| Ok(vec![movie(1, "Trending One")]));

        let list = select_recommendations(&store, &provider).await;
        assert_eq!(list.source, RecommendationSource::Trending);
        assert_eq!(list.title, TRENDING_TITLE);
        assert_eq!(list.movies, vec![movie(1, "Trending One")]);
    }

    #[tokio::test]
    async fn test_liked_rating_returns_recommendations() {
        let store = store_with(&[(603, 5, "The Matrix"), (78, 4, "Blade Runner")]).await;

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_recommendations()
            .with(eq(78))
            .times(1)
            .returning(|_| Ok(vec![movie(335984, "Blade Runner 2049")]));
        provider.expect_trending_week().never();

        let list = select_recommendations(&store, &provider).await;
        assert_eq!(list.title, "Because you liked Blade Runner");
        assert_eq!(
            list.source,
            RecommendationSource::BasedOn {
                tmdb_id: 78,
                title: "Blade Runner".to_string()
            }
        );
        assert_eq!(list.movies[0].id, 335984);
    }

    #[tokio::test]
    async fn test_failed_recommendations_fall_back() {
        let store = store_with(&[(603, 5, "The Matrix")]).await;

        let mut provider = MockCatalogProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_recommendations()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));
        provider
            .expect_trending_week()
            .times(1)
            .returning(|| Ok(vec![movie(2, "Trending Two")]));

        let list = select_recommendations(&store, &provider).await;
        assert_eq!(list.source, RecommendationSource::Trending);
        assert_eq!(list.movies[0].id, 2);
    }

    #[tokio::test]
    async fn test_empty_recommendations_fall_back() {
        let store = store_with(&[(603, 4, "The Matrix")]).await;

        let mut provider = MockCatalogProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_recommendations()
            .with(eq(603))
            .times(1)
            .returning(|_| Ok(vec![]));
        provider
            .expect_trending_week()
            .times(1)
            .returning(|| Ok(vec![movie(3, "Trending Three")]));

        let list = select_recommendations(&store, &provider).await;
        assert_eq!(list.source, RecommendationSource::Trending);
        assert_eq!(list.title, TRENDING_TITLE);
        assert_eq!(list.movies[0].id, 3);
    }

    #[tokio::test]
    async fn test_everything_failing_yields_empty_trending() {
        let store = store_with(&[]).await;

        let mut provider = MockCatalogProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_trending_week()
            .returning(|| Err(AppError::ExternalApi("offline".to_string())));

        let list = select_recommendations(&store, &provider).await;
        assert_eq!(list.source, RecommendationSource::Trending);
        assert!(list.movies.is_empty());
    }
}
