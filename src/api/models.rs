//! Wire models for the search API

use serde::{Deserialize, Deserializer, Serialize};

/// A single search hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRecord {
    /// Title of the result
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Target URL
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Content snippet; may carry inline markup from the server
    #[serde(deserialize_with = "null_as_default")]
    pub snippet: String,
    /// Relevance score assigned by the server
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
}

impl ResultRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    /// Results for the requested page
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<ResultRecord>,
    /// Total matches across all pages
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u64,
}

/// Parameters of a search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text
    pub query: String,
    /// Zero-based page index
    pub page: u32,
    /// Results per page
    pub size: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, page: u32, size: u32) -> Self {
        Self {
            query: query.into(),
            page,
            size,
        }
    }

    /// Query string pairs as sent on the wire
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ]
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
