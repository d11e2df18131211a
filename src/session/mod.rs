//! Search session
//!
//! Wires the suggestion fetcher and the search controller to user input.
//! Presentation stays outside: a front-end feeds events in and renders
//! [`SessionView`] snapshots through a [`crate::render::Presenter`].

mod events;

pub use events::{ClickOutsideListener, InputBus, InputEvent};

use crate::api::{ResultRecord, SearchApi};
use crate::autocomplete::{SuggestPhase, SuggestionFetcher};
use crate::config::Settings;
use crate::search::{Pagination, Rejection, SearchController, SearchOutcome, SearchPhase};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Combined state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Suggesting,
    Searching,
    Error,
}

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub query: String,
    /// Suggestions to show; empty while the panel is hidden
    pub suggestions: Vec<String>,
    pub suggestions_loading: bool,
    pub searched_query: Option<String>,
    pub results: Vec<ResultRecord>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
    pub search_time: Option<Duration>,
}

/// One mounted search view
pub struct Session {
    controller: SearchController,
    fetcher: SuggestionFetcher,
    listener: Option<ClickOutsideListener>,
}

impl Session {
    pub fn new(api: Arc<dyn SearchApi>, settings: &Settings) -> Self {
        Self {
            controller: SearchController::new(api.clone(), &settings.search),
            fetcher: SuggestionFetcher::new(api, &settings.suggestions),
            listener: None,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn suggestions(&self) -> &SuggestionFetcher {
        &self.fetcher
    }

    /// Register the click-outside listener; a second call is a no-op
    pub fn mount(&mut self, bus: &InputBus) -> bool {
        if self.listener.is_some() {
            debug!("Session already mounted");
            return false;
        }
        self.listener = Some(ClickOutsideListener::register(bus, self.fetcher.panel()));
        true
    }

    /// Release the click-outside listener
    pub async fn unmount(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.release().await;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// The user edited the search box
    pub fn input(&mut self, text: &str) {
        self.controller.set_query(text);
        self.fetcher.on_query_change(text);
    }

    pub fn focus(&self) {
        self.fetcher.focus();
    }

    /// Search for the current query text
    pub async fn submit(&mut self) -> SearchOutcome {
        let query = self.controller.query();
        if !query.trim().is_empty() {
            self.fetcher.dismiss();
        }
        self.controller.submit_search(&query).await
    }

    /// Search for the suggestion at `index`
    pub async fn select_suggestion(&mut self, index: usize) -> SearchOutcome {
        let Some(suggestion) = self.fetcher.select(index) else {
            return SearchOutcome::Rejected(Rejection::UnknownSuggestion);
        };
        self.controller.set_query(&suggestion);
        self.controller.submit_search(&suggestion).await
    }

    pub async fn next_page(&self) -> SearchOutcome {
        self.controller.next_page().await
    }

    pub async fn previous_page(&self) -> SearchOutcome {
        self.controller.previous_page().await
    }

    pub fn status(&self) -> Status {
        let search = self.controller.snapshot();
        let suggest = self.fetcher.snapshot();

        match search.phase {
            SearchPhase::Searching { .. } => Status::Searching,
            SearchPhase::Failed { .. } => Status::Error,
            SearchPhase::Idle if suggest.phase != SuggestPhase::Idle || suggest.is_visible() => {
                Status::Suggesting
            }
            SearchPhase::Idle => Status::Idle,
        }
    }

    pub fn view(&self) -> SessionView {
        let search = self.controller.snapshot();
        let suggest = self.fetcher.snapshot();
        let visible = suggest.is_visible();

        SessionView {
            query: search.query.clone(),
            suggestions: if visible {
                suggest.suggestions.clone()
            } else {
                Vec::new()
            },
            suggestions_loading: suggest.show && suggest.is_loading(),
            loading: search.is_loading(),
            error: search.error().map(String::from),
            searched_query: search.searched_query,
            results: search.results,
            pagination: search.pagination,
            search_time: search.search_time,
        }
    }
}
