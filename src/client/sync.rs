//! HTTP client for the reelbox server, used to mirror local writes.

use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{AuthResponse, Rating, RatingInput},
};

#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http_client.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json::<T>().await?)
    }

    /// Registers an account and keeps the returned token for later calls
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthResponse> {
        let auth: AuthResponse = self
            .post(
                "/api/auth/register",
                &json!({ "name": name, "email": email, "password": password }),
            )
            .await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Logs in and keeps the returned token for later calls
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let auth: AuthResponse = self
            .post(
                "/api/auth/login",
                &json!({ "email": email, "password": password }),
            )
            .await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Mirrors a rating to the server
    ///
    /// Returns `Ok(None)` without a request when no token is held.
    pub async fn push_rating(&self, input: &RatingInput) -> AppResult<Option<Rating>> {
        if self.token.is_none() {
            return Ok(None);
        }

        let rating: Rating = self
            .post(
                "/api/ratings",
                &json!({
                    "tmdb_id": input.tmdb_id,
                    "rating": input.rating,
                    "review": input.review,
                    "title": input.title,
                    "poster_path": input.poster_path,
                }),
            )
            .await?;
        Ok(Some(rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn input() -> RatingInput {
        RatingInput {
            tmdb_id: 603,
            rating: 5,
            review: None,
            title: Some("The Matrix".to_string()),
            poster_path: None,
        }
    }

    #[tokio::test]
    async fn test_push_without_token_is_noop() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        assert!(client.push_rating(&input()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_push_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ratings"))
            .and(header("authorization", "Bearer abc"))
            .and(body_partial_json(serde_json::json!({ "tmdb_id": 603, "rating": 5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "user_id": 9,
                "tmdb_id": 603,
                "rating": 5,
                "review": null,
                "title": "The Matrix",
                "poster_path": null,
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("abc");
        let rating = client.push_rating(&input()).await.unwrap().unwrap();
        assert_eq!(rating.user_id, 9);
    }

    fn auth_body(token: &str) -> serde_json::Value {
        serde_json::json!({
            "token": token,
            "user": {
                "id": 9,
                "name": "Ada",
                "email": "ada@example.com",
                "created_at": "2025-01-01T00:00:00Z"
            }
        })
    }

    async fn mount_rating_endpoint(server: &MockServer, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/ratings"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "user_id": 9,
                "tmdb_id": 603,
                "rating": 5,
                "review": null,
                "title": "The Matrix",
                "poster_path": null,
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_login_keeps_token_for_push() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_partial_json(serde_json::json!({
                "email": "ada@example.com",
                "password": "secret1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("login-token")))
            .expect(1)
            .mount(&server)
            .await;
        mount_rating_endpoint(&server, "login-token").await;

        let mut client = ApiClient::new(server.uri());
        assert!(client.token().is_none());

        let auth = client.login("ada@example.com", "secret1").await.unwrap();
        assert_eq!(auth.token, "login-token");
        assert_eq!(client.token(), Some("login-token"));

        let rating = client.push_rating(&input()).await.unwrap();
        assert!(rating.is_some());
    }

    #[tokio::test]
    async fn test_register_keeps_token_for_push() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_partial_json(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "secret1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("fresh-token")))
            .expect(1)
            .mount(&server)
            .await;
        mount_rating_endpoint(&server, "fresh-token").await;

        let mut client = ApiClient::new(server.uri());
        let auth = client
            .register("Ada", "ada@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(auth.user.id, 9);
        assert_eq!(client.token(), Some("fresh-token"));

        assert!(client.push_rating(&input()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut client = ApiClient::new(server.uri()).with_token("old");
        let result = client.login("ada@example.com", "wrong").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
        assert_eq!(client.token(), Some("old"));
    }

    #[tokio::test]
    async fn test_cleared_token_stops_push() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ratings"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut client = ApiClient::new(server.uri()).with_token("abc");
        client.set_token(None);
        assert!(client.token().is_none());
        assert!(client.push_rating(&input()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ratings"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("expired");
        assert!(matches!(
            client.push_rating(&input()).await,
            Err(AppError::ExternalApi(_))
        ));
    }
}
