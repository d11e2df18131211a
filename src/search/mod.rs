//! Search orchestration module
//!
//! Owns the query, pagination and result set, issues search requests,
//! and reconciles their responses with user actions.

mod controller;
mod models;

pub use controller::SearchController;
pub use models::*;
