//! In-memory search API for unit tests

use super::{ApiError, ResultRecord, SearchApi, SearchRequest, SearchResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

type SearchHandler = Box<dyn Fn(&SearchRequest) -> Result<SearchResponse, ApiError> + Send + Sync>;
type SuggestHandler = Box<dyn Fn(&str) -> Result<Vec<String>, ApiError> + Send + Sync>;

/// Scriptable [`SearchApi`] that records every call
pub(crate) struct MockApi {
    search_handler: Mutex<SearchHandler>,
    suggest_handler: Mutex<SuggestHandler>,
    delays: Mutex<HashMap<String, Duration>>,
    search_calls: Mutex<Vec<SearchRequest>>,
    suggestion_calls: Mutex<Vec<String>>,
}

impl MockApi {
    /// Every query matches `total` results
    pub fn with_total(total: u64) -> Self {
        let search: SearchHandler = Box::new(move |req: &SearchRequest| Ok(page_of(req, total)));
        let suggest: SuggestHandler =
            Box::new(|q: &str| Ok(vec![format!("{} one", q), format!("{} two", q)]));

        Self {
            search_handler: Mutex::new(search),
            suggest_handler: Mutex::new(suggest),
            delays: Mutex::new(HashMap::new()),
            search_calls: Mutex::new(Vec::new()),
            suggestion_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_search(
        self,
        handler: impl Fn(&SearchRequest) -> Result<SearchResponse, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.set_search(handler);
        self
    }

    pub fn on_suggest(
        self,
        handler: impl Fn(&str) -> Result<Vec<String>, ApiError> + Send + Sync + 'static,
    ) -> Self {
        *self.suggest_handler.lock().unwrap() = Box::new(handler);
        self
    }

    /// Replace the search behavior of an already shared mock
    pub fn set_search(
        &self,
        handler: impl Fn(&SearchRequest) -> Result<SearchResponse, ApiError> + Send + Sync + 'static,
    ) {
        *self.search_handler.lock().unwrap() = Box::new(handler);
    }

    /// Hold responses for `query` (search or suggestions) for `delay`
    pub fn delay(self, query: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(query.to_string(), delay);
        self
    }

    pub fn search_calls(&self) -> Vec<SearchRequest> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn suggestion_calls(&self) -> Vec<String> {
        self.suggestion_calls.lock().unwrap().clone()
    }

    async fn wait_for(&self, query: &str) {
        let delay = self.delays.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SearchApi for MockApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.search_calls.lock().unwrap().push(request.clone());
        self.wait_for(&request.query).await;
        let handler = self.search_handler.lock().unwrap();
        (*handler)(request)
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<String>, ApiError> {
        self.suggestion_calls.lock().unwrap().push(query.to_string());
        self.wait_for(query).await;
        let handler = self.suggest_handler.lock().unwrap();
        (*handler)(query)
    }
}

/// Build the page `req` asks for out of `total` synthetic hits
pub(crate) fn page_of(req: &SearchRequest, total: u64) -> SearchResponse {
    let first = req.page as u64 * req.size as u64;
    let last = (first + req.size as u64).min(total);
    let results = (first..last)
        .map(|i| {
            ResultRecord::new(
                format!("{} #{}", req.query, i + 1),
                format!("http://example.com/{}", i + 1),
            )
            .with_snippet(format!("result <b>{}</b>", i + 1))
            .with_score(1.0 / (i + 1) as f64)
        })
        .collect();

    SearchResponse {
        results,
        total_count: total,
    }
}

pub(crate) fn server_error() -> ApiError {
    ApiError::Status {
        status: 503,
        url: "http://localhost:8080/api/search".to_string(),
    }
}
