//! HTTP route handlers.

pub mod dev;
pub mod events;
pub mod health;
pub mod matches;
pub mod teams;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::state::AppState;
use touchline_core::Error;

/// Status plus JSON body; every handler returns this.
pub type ApiResponse = (StatusCode, Json<serde_json::Value>);

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(teams::routes())
        .merge(matches::routes())
        .merge(events::routes())
        .merge(dev::routes())
}

pub(crate) fn error_body(status: StatusCode, message: impl Into<String>) -> ApiResponse {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// Map a store/parser error onto a status code.
pub(crate) fn error_response(e: &Error) -> ApiResponse {
    let status = match e {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => {
            error!("Request failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_body(status, e.to_string())
}
