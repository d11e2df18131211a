//! Search-Client-RS: a search front-end core with debounced autocomplete
//!
//! Collects a query, fetches suggestions while the user types, submits
//! searches to a remote API, and pages through the results. Rendering is
//! left to a pluggable [`render::Presenter`].

pub mod api;
pub mod autocomplete;
pub mod config;
pub mod network;
pub mod render;
pub mod search;
pub mod session;

pub use api::{HttpSearchApi, ResultRecord, SearchApi};
pub use config::Settings;
pub use search::{SearchController, SearchOutcome};
pub use session::Session;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
