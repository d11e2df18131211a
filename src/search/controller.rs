//! Search and pagination controller

use super::models::*;
use crate::api::{ApiError, SearchApi, SearchRequest, SearchResponse};
use crate::config::SearchSettings;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

const EVENT_CAPACITY: usize = 64;

/// Owns the query, pagination and result set, and issues search requests
pub struct SearchController {
    api: Arc<dyn SearchApi>,
    state: RwLock<ControllerState>,
    /// Last sequence number handed to a request
    sequence: AtomicU64,
    events: broadcast::Sender<ControllerEvent>,
    error_message: String,
}

impl SearchController {
    pub fn new(api: Arc<dyn SearchApi>, settings: &SearchSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            api,
            state: RwLock::new(ControllerState::new(settings.page_size)),
            sequence: AtomicU64::new(0),
            events,
            error_message: settings.error_message.clone(),
        }
    }

    /// Receive state change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ControllerState {
        self.state.read().unwrap().clone()
    }

    pub fn query(&self) -> String {
        self.state.read().unwrap().query.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.state.read().unwrap().pagination
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error().map(String::from)
    }

    /// Record an edit of the query text
    pub fn set_query(&self, query: &str) {
        self.state.write().unwrap().query = query.to_string();
    }

    /// Start a new search for `query` from the first page
    pub async fn submit_search(&self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            debug!("Ignoring blank search");
            return SearchOutcome::Rejected(Rejection::EmptyQuery);
        }

        let seq = self.next_sequence();
        let request = {
            let mut state = self.state.write().unwrap();
            if let SearchPhase::Searching { seq: previous, .. } = state.phase {
                debug!(previous, seq, "New search supersedes outstanding request");
            }
            state.query = query.to_string();
            state.pagination.page = 0;
            state.phase = SearchPhase::Searching {
                seq,
                kind: RequestKind::NewSearch,
            };
            SearchRequest::new(query, 0, state.pagination.page_size)
        };

        self.run(seq, RequestKind::NewSearch, request).await
    }

    /// Move `delta` pages through the current result set
    pub async fn change_page(&self, delta: i64) -> SearchOutcome {
        let (seq, request) = {
            let mut state = self.state.write().unwrap();
            if state.is_loading() {
                debug!(delta, "Ignoring page change while a search is outstanding");
                return SearchOutcome::Rejected(Rejection::Busy);
            }
            let Some(new_page) = state.pagination.target(delta) else {
                debug!(
                    delta,
                    page = state.pagination.page,
                    total = state.pagination.total_results,
                    "Page change out of range"
                );
                return SearchOutcome::Rejected(Rejection::OutOfRange);
            };
            let Some(query) = state.searched_query.clone() else {
                return SearchOutcome::Rejected(Rejection::OutOfRange);
            };
            let seq = self.next_sequence();
            state.phase = SearchPhase::Searching {
                seq,
                kind: RequestKind::PageChange,
            };
            (seq, SearchRequest::new(query, new_page, state.pagination.page_size))
        };

        self.run(seq, RequestKind::PageChange, request).await
    }

    pub async fn next_page(&self) -> SearchOutcome {
        self.change_page(1).await
    }

    pub async fn previous_page(&self) -> SearchOutcome {
        self.change_page(-1).await
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn run(&self, seq: u64, kind: RequestKind, request: SearchRequest) -> SearchOutcome {
        let _ = self.events.send(ControllerEvent::SearchStarted {
            query: request.query.clone(),
            page: request.page,
        });

        let started = Instant::now();
        let result = self.api.search(&request).await;
        self.complete(seq, kind, &request, started, result)
    }

    fn complete(
        &self,
        seq: u64,
        kind: RequestKind,
        request: &SearchRequest,
        started: Instant,
        result: Result<SearchResponse, ApiError>,
    ) -> SearchOutcome {
        let mut state = self.state.write().unwrap();
        if !state.phase.awaits(seq) {
            debug!(seq, query = %request.query, "Discarding stale search response");
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                let elapsed = started.elapsed();
                let count = response.results.len();

                state.results = response.results;
                state.pagination.page = request.page;
                state.pagination.total_results = response.total_count;
                state.searched_query = Some(request.query.clone());
                state.search_time = Some(elapsed);
                state.phase = SearchPhase::Idle;
                drop(state);

                info!(
                    query = %request.query,
                    page = request.page,
                    total = response.total_count,
                    "Search returned {} results in {:?}",
                    count,
                    elapsed
                );

                if kind == RequestKind::PageChange {
                    let _ = self.events.send(ControllerEvent::ScrollToTop);
                }
                let _ = self.events.send(ControllerEvent::ResultsUpdated);
                SearchOutcome::Applied
            }
            Err(e) => {
                state.phase = SearchPhase::Failed {
                    message: self.error_message.clone(),
                };
                drop(state);

                error!(
                    query = %request.query,
                    page = request.page,
                    timeout = e.is_timeout(),
                    "Search request failed: {}",
                    e
                );

                let _ = self.events.send(ControllerEvent::SearchFailed {
                    message: self.error_message.clone(),
                });
                SearchOutcome::Failed
            }
        }
    }
}
