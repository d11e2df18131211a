//! HTTP client for talking to the search API

use crate::api::ApiError;
use crate::config::ApiSettings;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// Raw response from the search API
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub text: String,
    /// Final URL after redirects
    pub url: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper with search-client configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ApiError> {
        Self::with_settings(&ApiSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs_f64(settings.request_timeout);
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("search-client-rs/{}", crate::VERSION));

        Ok(Self {
            client,
            default_timeout: timeout,
            user_agent,
        })
    }

    /// GET request with query parameters
    pub async fn get_with_params(
        &self,
        url: &Url,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, ApiError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.default_timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> Result<ApiResponse, ApiError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(ApiResponse { status, text, url })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
