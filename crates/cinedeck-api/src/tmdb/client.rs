//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::types::{
    MovieCategory, SearchMovieParams, TmdbErrorResponse, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbVideoListResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests authenticate against TMDB.
#[derive(Clone)]
pub enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as `Authorization: Bearer`.
    BearerToken(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
        }
    }
}

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Request credential.
    credential: Credential,
    /// Response language sent with every request.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    credential: Option<Credential>,
    user_agent: Option<String>,
    language: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            credential: None,
            user_agent: None,
            language: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key. Replaces any credential set before.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credential = Some(Credential::ApiKey(key.into()));
        self
    }

    /// Sets the v4 bearer token. Replaces any credential set before.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Credential::BearerToken(token.into()));
        self
    }

    /// Sets the credential directly.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - No credential is set, or it is empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let credential = self
            .credential
            .context("api_key or api_token is required")?;
        let secret = match &credential {
            Credential::ApiKey(s) | Credential::BearerToken(s) => s,
        };
        ensure!(!secret.trim().is_empty(), "TMDB credential must not be empty");
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credential,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a single authenticated GET request and decodes the JSON body.
    ///
    /// Any non-success status is an error; there is no retry.
    #[instrument(skip_all, fields(path = %path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut builder = self
            .http_client
            .get(url)
            .query(&[("language", self.language.as_str())])
            .query(query);
        builder = match &self.credential {
            Credential::ApiKey(key) => builder.query(&[("api_key", key.as_str())]),
            Credential::BearerToken(token) => builder.bearer_auth(token),
        };
        let request = builder
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        // The full URL may carry the API key, so only the path is logged.
        tracing::debug!(path, "TMDB API request");

        let result = self
            .http_client
            .execute(request)
            .await
            .map_err(reqwest::Error::without_url);
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

/// Rejects identifiers that would escape the `movie/{id}` path.
fn validate_movie_id(movie_id: &str) -> Result<&str> {
    let id = movie_id.trim();
    ensure!(
        !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()),
        "invalid movie id: {movie_id:?}"
    );
    Ok(id)
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(category = %category))]
    async fn movie_list(&self, category: MovieCategory) -> Result<TmdbMovieListResponse> {
        let path = format!("movie/{}", category.token());
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all, fields(movie_id = %movie_id))]
    async fn movie_details(&self, movie_id: &str) -> Result<TmdbMovieDetails> {
        let id = validate_movie_id(movie_id)?;
        let path = format!("movie/{id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all, fields(movie_id = %movie_id))]
    async fn movie_videos(&self, movie_id: &str) -> Result<TmdbVideoListResponse> {
        let id = validate_movie_id(movie_id)?;
        let path = format!("movie/{id}/videos");
        self.get_json(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::tmdb::trailer::find_trailer;

    async fn mock_client(mock_server: &wiremock::MockServer) -> TmdbClient {
        let base_url = format!("{}/3/", mock_server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_credential() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_key or api_token is required")
        );
    }

    #[test]
    fn test_builder_rejects_empty_credential() {
        // Arrange & Act
        let result = TmdbClient::builder()
            .api_key("  ")
            .user_agent("test/0.0.0")
            .build();

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must not be empty"));
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_key("test-key").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = TmdbClient::builder()
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.language, "en-US");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        // Arrange
        let credential = Credential::ApiKey(String::from("super-secret"));

        // Act
        let printed = format!("{credential:?}");

        // Assert
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_validate_movie_id() {
        // Arrange & Act & Assert
        assert_eq!(validate_movie_id("42").unwrap(), "42");
        assert!(validate_movie_id("").is_err());
        assert!(validate_movie_id("../tv/1").is_err());
        assert!(validate_movie_id("12a").is_err());
    }

    #[test]
    fn test_parse_now_playing_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_now_playing.json");

        // Act
        let response: TmdbMovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.page, 1);
        assert_eq!(response.results.len(), 3);
        let first = &response.results[0];
        assert_eq!(first.id, 1_022_789);
        assert_eq!(first.title, "Inside Out 2");
        assert_eq!(first.release_year(), Some(2024));
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_details_603.json");

        // Act
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 603);
        assert_eq!(details.title, "The Matrix");
        assert_eq!(details.release_year(), Some(1999));
        assert_eq!(details.runtime, Some(136));
        assert!(!details.genres.is_empty());
    }

    #[test]
    fn test_parse_movie_videos_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_videos_603.json");

        // Act
        let response: TmdbVideoListResponse = serde_json::from_str(json).unwrap();
        let trailer = find_trailer(&response.results).unwrap();

        // Assert
        assert_eq!(response.id, 603);
        assert_eq!(trailer.key, "vKQi3bBA1y8");
    }

    #[tokio::test]
    async fn test_movie_list_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_now_playing.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/now_playing"))
            .and(wiremock::matchers::query_param("api_key", "test-key"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;

        // Act
        let response = client.movie_list(MovieCategory::NowPlaying).await.unwrap();

        // Assert
        assert_eq!(response.results.len(), 3);
        assert_eq!(response.results[0].title, "Inside Out 2");
    }

    const CATEGORIES: [MovieCategory; 4] = [
        MovieCategory::NowPlaying,
        MovieCategory::Upcoming,
        MovieCategory::Popular,
        MovieCategory::TopRated,
    ];

    #[tokio::test]
    async fn test_every_category_hits_its_endpoint() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_list_empty.json");

        for category in CATEGORIES {
            wiremock::Mock::given(wiremock::matchers::method("GET"))
                .and(wiremock::matchers::path(format!("/3/movie/{}", category.token())))
                .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = mock_client(&mock_server).await;

        // Act & Assert (each mock expects exactly one hit)
        for category in CATEGORIES {
            let response = client.movie_list(category).await.unwrap();
            assert!(response.results.is_empty());
        }
    }

    #[tokio::test]
    async fn test_search_movie_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_movie_matrix.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/movie"))
            .and(wiremock::matchers::query_param("query", "The Matrix"))
            .and(wiremock::matchers::query_param("page", "1"))
            .and(wiremock::matchers::query_param("include_adult", "false"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;
        let params = SearchMovieParams::new("The Matrix");

        // Act
        let response = client.search_movie(&params).await.unwrap();

        // Assert
        assert!(!response.results.is_empty());
        assert_eq!(response.results[0].id, 603);
    }

    #[tokio::test]
    async fn test_movie_details_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_details_603.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/603"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;

        // Act
        let details = client.movie_details("603").await.unwrap();

        // Assert
        assert_eq!(details.id, 603);
        assert_eq!(details.title, "The Matrix");
    }

    #[tokio::test]
    async fn test_movie_videos_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_videos_603.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/603/videos"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;

        // Act
        let videos = client.movie_videos("603").await.unwrap();

        // Assert
        assert_eq!(videos.results.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_movie_id_issues_no_request() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::any())
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;

        // Act
        let result = client.movie_details("../search/movie").await;

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid movie id"));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_list_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer my-secret-token",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/3/", mock_server.uri());
        let client = TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token("my-secret-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act & Assert (mock expect(1) verifies Authorization header)
        client.movie_list(MovieCategory::Upcoming).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_returns_tmdb_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;

        // Act
        let result = client.movie_list(MovieCategory::Popular).await;

        // Assert
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("TMDB API error"));
        assert!(err.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_http_429_is_not_retried() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":25,"status_message":"Your request count is over the allowed limit.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;

        // Act
        let result = client.movie_list(MovieCategory::TopRated).await;

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(r#"{"page":1}"#))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server).await;

        // Act
        let result = client.movie_list(MovieCategory::NowPlaying).await;

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to decode JSON response")
        );
    }
}
