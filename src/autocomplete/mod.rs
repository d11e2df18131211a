//! Autocomplete suggestions for the search box
//!
//! Debounces query edits and fetches completion strings from the search API.

mod fetcher;

pub use fetcher::{SuggestPhase, SuggestionFetcher, SuggestionPanel, SuggestionState};
