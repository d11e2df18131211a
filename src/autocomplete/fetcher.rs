//! Debounced suggestion fetching

use crate::api::SearchApi;
use crate::config::SuggestionSettings;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Where the fetcher is in its debounce/request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestPhase {
    #[default]
    Idle,
    /// Waiting for typing to pause
    Debouncing,
    /// Request in flight
    Fetching,
}

/// What the suggestion panel shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionState {
    /// Latest query text received
    pub query: String,
    pub suggestions: Vec<String>,
    pub phase: SuggestPhase,
    /// Cleared on click outside, submit, or selection
    pub show: bool,
}

impl SuggestionState {
    pub fn is_loading(&self) -> bool {
        self.phase == SuggestPhase::Fetching
    }

    pub fn is_visible(&self) -> bool {
        self.show && !self.query.is_empty() && !self.suggestions.is_empty()
    }
}

/// Handle for closing the panel from outside the fetcher
#[derive(Clone)]
pub struct SuggestionPanel {
    state: Arc<watch::Sender<SuggestionState>>,
}

impl SuggestionPanel {
    pub fn hide(&self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.show, false));
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible()
    }
}

/// Fetches completions once the query has stopped changing
///
/// Every edit restarts the debounce timer, so only the last query of a
/// burst reaches the API. Each scheduled fetch carries a generation number
/// and its response is dropped if a later edit bumped the generation.
/// Must be driven from within a Tokio runtime.
pub struct SuggestionFetcher {
    api: Arc<dyn SearchApi>,
    min_query_len: usize,
    debounce: Duration,
    state: Arc<watch::Sender<SuggestionState>>,
    generation: Arc<AtomicU64>,
    timer: Option<JoinHandle<()>>,
}

impl SuggestionFetcher {
    pub fn new(api: Arc<dyn SearchApi>, settings: &SuggestionSettings) -> Self {
        let (state, _) = watch::channel(SuggestionState::default());

        Self {
            api,
            min_query_len: settings.min_query_len,
            debounce: settings.debounce(),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            timer: None,
        }
    }

    /// Current panel contents
    pub fn snapshot(&self) -> SuggestionState {
        self.state.borrow().clone()
    }

    /// Watch panel changes, e.g. to redraw
    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state.subscribe()
    }

    pub fn panel(&self) -> SuggestionPanel {
        SuggestionPanel {
            state: self.state.clone(),
        }
    }

    /// React to an edit of the query text
    pub fn on_query_change(&mut self, query: &str) {
        self.cancel_timer();
        let generation = self.bump_generation();
        let too_short = query.chars().count() < self.min_query_len;

        self.state.send_modify(|s| {
            s.query = query.to_string();
            s.show = true;
            if too_short {
                s.suggestions.clear();
                s.phase = SuggestPhase::Idle;
            } else {
                s.phase = SuggestPhase::Debouncing;
            }
        });

        if too_short {
            return;
        }

        let api = self.api.clone();
        let state = self.state.clone();
        let generations = self.generation.clone();
        let debounce = self.debounce;
        let query = query.to_string();

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Detached so that cancelling the timer never cancels a request
            tokio::spawn(fetch(api, state, generations, generation, query));
        }));
    }

    pub fn focus(&self) {
        self.state.send_if_modified(|s| !std::mem::replace(&mut s.show, true));
    }

    pub fn hide(&self) {
        self.panel().hide();
    }

    /// Close and clear the panel when a search is committed
    pub fn dismiss(&mut self) {
        self.cancel_timer();
        self.bump_generation();
        self.state.send_modify(|s| {
            s.show = false;
            s.suggestions.clear();
            s.phase = SuggestPhase::Idle;
        });
    }

    /// Pick the suggestion at `index`; ends the current typing burst
    pub fn select(&mut self, index: usize) -> Option<String> {
        let picked = self.state.borrow().suggestions.get(index).cloned();
        if let Some(ref suggestion) = picked {
            debug!(index, suggestion = %suggestion, "Suggestion selected");
            self.dismiss();
        }
        picked
    }

    /// Wait until no timer or current request is outstanding
    pub async fn settled(&self) {
        let mut rx = self.state.subscribe();
        let _ = rx.wait_for(|s| s.phase == SuggestPhase::Idle).await;
    }

    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for SuggestionFetcher {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

async fn fetch(
    api: Arc<dyn SearchApi>,
    state: Arc<watch::Sender<SuggestionState>>,
    generations: Arc<AtomicU64>,
    generation: u64,
    query: String,
) {
    let is_current = || generations.load(Ordering::SeqCst) == generation;

    let started = state.send_if_modified(|s| {
        if !is_current() {
            return false;
        }
        s.phase = SuggestPhase::Fetching;
        true
    });
    if !started {
        return;
    }

    debug!(query = %query, generation, "Fetching suggestions");
    let result = api.suggestions(&query).await;

    match result {
        Ok(suggestions) => {
            let applied = state.send_if_modified(|s| {
                if !is_current() {
                    return false;
                }
                debug!(query = %query, count = suggestions.len(), "Suggestions updated");
                s.suggestions = suggestions;
                s.phase = SuggestPhase::Idle;
                true
            });
            if !applied {
                debug!(query = %query, generation, "Discarding stale suggestions");
            }
        }
        Err(e) => {
            warn!(query = %query, "Suggestion request failed: {}", e);
            state.send_if_modified(|s| {
                if !is_current() {
                    return false;
                }
                s.phase = SuggestPhase::Idle;
                true
            });
        }
    }
}
