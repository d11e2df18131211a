//! HTTP implementation of the search API

use super::{ApiError, SearchApi, SearchRequest, SearchResponse};
use crate::config::ApiSettings;
use crate::network::{ApiResponse, HttpClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Search API reached over HTTP GET
pub struct HttpSearchApi {
    client: HttpClient,
    search_url: Url,
    suggestions_url: Url,
}

impl HttpSearchApi {
    /// Build endpoint URLs from settings
    pub fn new(client: HttpClient, settings: &ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)?;

        Ok(Self {
            client,
            search_url: base.join(&settings.search_path)?,
            suggestions_url: base.join(&settings.suggestions_path)?,
        })
    }

    /// Create from settings with a fresh client
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::new(HttpClient::with_settings(settings)?, settings)
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub fn suggestions_url(&self) -> &Url {
        &self.suggestions_url
    }

    fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                url: response.url,
            });
        }

        Ok(serde_json::from_str(&response.text)?)
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        debug!(
            query = %request.query,
            page = request.page,
            size = request.size,
            "GET {}",
            self.search_url
        );

        let response = self
            .client
            .get_with_params(&self.search_url, &request.params())
            .await?;

        Self::decode(response)
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, ApiError> {
        debug!(query, "GET {}", self.suggestions_url);

        let response = self
            .client
            .get_with_params(&self.suggestions_url, &[("q", query.to_string())])
            .await?;

        Self::decode(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(base_url: &str) -> HttpSearchApi {
        let settings = ApiSettings {
            base_url: base_url.to_string(),
            request_timeout: 2.0,
            ..Default::default()
        };
        HttpSearchApi::from_settings(&settings).unwrap()
    }

    #[test]
    fn test_endpoint_urls() {
        let api = api_for("http://localhost:8080");
        assert_eq!(api.search_url().as_str(), "http://localhost:8080/api/search");
        assert_eq!(
            api.suggestions_url().as_str(),
            "http://localhost:8080/api/suggestions"
        );
    }

    #[tokio::test]
    async fn test_search_sends_paging_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("query", "cats near me"))
            .and(query_param("page", "1"))
            .and(query_param("size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"title": "Cats", "url": "http://a", "snippet": "...", "score": 0.9}],
                "totalCount": 25
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server.uri());
        let response = api
            .search(&SearchRequest::new("cats near me", 1, 10))
            .await
            .unwrap();

        assert_eq!(response.total_count, 25);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "Cats");
    }

    #[tokio::test]
    async fn test_search_partial_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let api = api_for(&server.uri());
        let response = api.search(&SearchRequest::new("x", 0, 10)).await.unwrap();

        assert_eq!(response, SearchResponse::default());
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = api_for(&server.uri());
        let err = api
            .search(&SearchRequest::new("cat", 0, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_search_garbage_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let api = api_for(&server.uri());
        let err = api
            .search(&SearchRequest::new("cat", 0, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/suggestions"))
            .and(query_param("q", "ca"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["cat", "cats near me"])))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server.uri());
        let suggestions = api.suggestions("ca").await.unwrap();

        assert_eq!(suggestions, vec!["cat", "cats near me"]);
    }

    #[tokio::test]
    async fn test_suggestions_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/suggestions"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let api = api_for(&server.uri());
        assert!(api.suggestions("  ").await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Nothing listens on port 1
        let api = api_for("http://127.0.0.1:1");
        let err = api
            .search(&SearchRequest::new("cat", 0, 10))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }
}
