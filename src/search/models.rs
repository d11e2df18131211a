//! Search state and related data models

use crate::api::ResultRecord;
use serde::Serialize;
use std::time::Duration;

/// Position within a paginated result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Zero-based page index
    pub page: u32,
    /// Results per page
    pub page_size: u32,
    /// Total matches reported by the server
    pub total_results: u64,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
            total_results: 0,
        }
    }

    /// One-based index of the first result on the current page
    pub fn start(&self) -> u64 {
        self.page as u64 * self.page_size as u64 + 1
    }

    /// One-based index of the last result on the current page
    pub fn end(&self) -> u64 {
        ((self.page as u64 + 1) * self.page_size as u64).min(self.total_results)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64 + 1) * (self.page_size as u64) < self.total_results
    }

    /// Page reached by moving `delta` pages, if that page exists
    pub fn target(&self, delta: i64) -> Option<u32> {
        let new_page = (self.page as i64).checked_add(delta)?;
        let new_page = u32::try_from(new_page).ok()?;
        if delta > 0 && new_page as u64 * self.page_size as u64 >= self.total_results {
            return None;
        }
        Some(new_page)
    }
}

/// Which user action issued a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Submission or suggestion pick; pagination restarts at zero
    NewSearch,
    /// Navigation within the current query's results
    PageChange,
}

/// Request lifecycle of the controller
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching {
        /// Sequence number of the outstanding request
        seq: u64,
        kind: RequestKind,
    },
    Failed {
        message: String,
    },
}

impl SearchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchPhase::Searching { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Whether a response tagged `seq` is still the one we wait for
    pub fn awaits(&self, seq: u64) -> bool {
        matches!(self, SearchPhase::Searching { seq: current, .. } if *current == seq)
    }
}

/// Everything the controller owns
#[derive(Debug, Clone, Serialize)]
pub struct ControllerState {
    /// What the user is searching for
    pub query: String,
    /// Query that produced the displayed results
    pub searched_query: Option<String>,
    pub pagination: Pagination,
    pub results: Vec<ResultRecord>,
    pub phase: SearchPhase,
    /// Wall-clock time of the last successful request
    pub search_time: Option<Duration>,
}

impl ControllerState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            searched_query: None,
            pagination: Pagination::new(page_size),
            results: Vec::new(),
            phase: SearchPhase::Idle,
            search_time: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }
}

/// Why an action did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Blank query text
    EmptyQuery,
    /// Target page before the first or past the last
    OutOfRange,
    /// A request is outstanding
    Busy,
    /// No suggestion at the picked index
    UnknownSuggestion,
}

/// Result of a controller action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Response applied to the state
    Applied,
    /// Action ignored, state untouched
    Rejected(Rejection),
    /// Request failed and the error state is set
    Failed,
    /// A newer request took over; the response was discarded
    Superseded,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    SearchStarted { query: String, page: u32 },
    ResultsUpdated,
    /// Page navigation succeeded; the view should return to the top
    ScrollToTop,
    SearchFailed { message: String },
}
