//! Search API contract
//!
//! The controller and the suggestion fetcher only see the [`SearchApi`] trait;
//! [`HttpSearchApi`] is the implementation that talks to the remote server.

mod error;
mod http;
mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApiError;
pub use http::HttpSearchApi;
pub use models::{ResultRecord, SearchRequest, SearchResponse};

use async_trait::async_trait;

/// Remote search service as seen by the client
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch one page of results
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError>;

    /// Fetch completion strings for a partial query
    async fn suggestions(&self, query: &str) -> Result<Vec<String>, ApiError>;
}
