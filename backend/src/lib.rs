//! # Chore Board Backend
//!
//! Everything behind the household chore board:
//! - **Storage**: SQLite connection and repositories for children, chores and
//!   weekly assignments
//! - **Domain**: weekday resolution, the reset-on-read chore state machine,
//!   the dashboard service and the daily digest
//! - **IO**: the axum dashboard and JSON API
//! - **Notifier**: delivery of the digest through a chat bot
//! - **Scheduler**: weekday-morning trigger for the notifier
//!
//! ## Architecture
//!
//! ```text
//! Browser / Scheduler
//!     ↓
//! IO Layer (axum handlers, HTML) / Notifier (Telegram)
//!     ↓
//! Domain Layer (BoardService, NotificationService)
//!     ↓
//! Storage Layer (DbConnection, repositories)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod notifier;
pub mod scheduler;
pub mod storage;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::{BoardService, Clock, WeekdayLocale};
use crate::storage::DbConnection;

pub use error::{ChoreError, Result};

/// Application state shared by the handlers
#[derive(Clone)]
pub struct AppState {
    pub board_service: BoardService,
}

/// Build the dashboard state around an already opened database
pub fn initialize_backend(db: DbConnection, clock: Arc<dyn Clock>, locale: WeekdayLocale) -> AppState {
    info!("Setting up domain services");
    AppState {
        board_service: BoardService::new(db, clock, locale),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/today", get(io::get_today))
        .route("/children/:id/pending", get(io::get_pending_for_child))
        .route("/assignments/:id/status", post(io::mark_assignment));

    Router::new()
        .route("/", get(io::dashboard_page))
        .route("/assignments/:id/toggle", post(io::toggle_assignment))
        .route("/health", get(io::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
