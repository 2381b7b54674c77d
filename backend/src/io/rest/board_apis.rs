//! # Board Endpoints
//!
//! The HTML dashboard and its JSON twin.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use shared::MarkChoreRequest;
use tracing::{error, info};

use crate::error::ChoreError;
use crate::io::html;
use crate::AppState;

/// Form posted by a dashboard checkbox
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub done: bool,
}

fn error_status(e: &ChoreError) -> StatusCode {
    match e {
        ChoreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET / - today's board
pub async fn dashboard_page(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /");

    match state.board_service.today_board().await {
        Ok(board) => (StatusCode::OK, Html(html::render_board(&board))).into_response(),
        Err(e) => {
            error!("Error loading board: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(html::render_error(&format!("Could not load today's chores: {}", e))),
            )
                .into_response()
        }
    }
}

/// POST /assignments/:id/toggle - checkbox write, then back to the board
pub async fn toggle_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<i64>,
    Form(form): Form<ToggleForm>,
) -> impl IntoResponse {
    info!("POST /assignments/{}/toggle - done: {}", assignment_id, form.done);

    match state.board_service.mark(assignment_id, form.done).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            error!("Error toggling assignment {}: {}", assignment_id, e);
            (error_status(&e), Html(html::render_error(&e.to_string()))).into_response()
        }
    }
}

/// GET /api/today
pub async fn get_today(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/today");

    match state.board_service.today_board().await {
        Ok(board) => (StatusCode::OK, Json(board)).into_response(),
        Err(e) => {
            error!("Error loading board: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading today's board").into_response()
        }
    }
}

/// GET /api/children/:id/pending
pub async fn get_pending_for_child(
    State(state): State<AppState>,
    Path(child_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/pending", child_id);

    match state.board_service.pending_for_child(child_id).await {
        Ok(chores) => (StatusCode::OK, Json(chores)).into_response(),
        Err(e) => {
            error!("Error loading pending chores: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading pending chores").into_response()
        }
    }
}

/// POST /api/assignments/:id/status
pub async fn mark_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<i64>,
    Json(request): Json<MarkChoreRequest>,
) -> impl IntoResponse {
    info!("POST /api/assignments/{}/status - request: {:?}", assignment_id, request);

    match state.board_service.mark(assignment_id, request.done).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Error marking assignment {}: {}", assignment_id, e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
