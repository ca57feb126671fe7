//! Health and store statistics.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// GET /api/health: liveness plus row counts.
async fn get_health(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.get_stats() {
        Ok(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "service": "touchline",
                "port": state.config.port,
                "clubs": stats.clubs,
                "teams": stats.teams,
                "players": stats.players,
                "matches": stats.matches,
                "events": stats.events,
                "db_size_mb": stats.db_size_mb,
            })),
        ),
        Err(e) => error_response(&e),
    }
}
