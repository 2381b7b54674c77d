//! # REST Interface Layer
//!
//! HTTP handlers for the dashboard page and the JSON API. Handlers only
//! translate between HTTP and [`crate::domain::BoardService`]; the chore
//! rules live in the domain layer.

pub mod board_apis;

pub use board_apis::*;
