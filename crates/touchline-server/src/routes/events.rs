//! Event routes: commentary parsing, raw-text ingestion, structured events.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use super::{error_body, error_response, ApiResponse};
use crate::state::AppState;
use touchline_parse::{EventType, TeamContext};
use touchline_store::{Match, NewEvent};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/parse", post(parse_preview))
        .route("/matches/{match_id}/events/raw", post(create_raw_event))
        .route(
            "/matches/{match_id}/events",
            post(create_event).get(list_events),
        )
}

fn load_match(state: &AppState, match_id: i64) -> Result<Match, ApiResponse> {
    match state.store.get_match(match_id) {
        Ok(Some(m)) => Ok(m),
        Ok(None) => Err(error_body(StatusCode::NOT_FOUND, "Match not found")),
        Err(e) => Err(error_response(&e)),
    }
}

// ---------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct ParseRequest {
    text: String,
    team_id: i64,
    #[serde(default)]
    opponents: Vec<String>,
    #[serde(default)]
    team_context: TeamContext,
}

/// POST /api/parse: parse and enrich without storing anything.
async fn parse_preview(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ParseRequest>,
) -> ApiResponse {
    match state.parser.parse_and_enrich_in_context(
        &req.text,
        &state.store,
        req.team_id,
        &req.opponents[..],
        req.team_context,
    ) {
        Ok(parsed) => (StatusCode::OK, Json(serde_json::json!(parsed))),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct RawEventRequest {
    raw_text: String,
    #[serde(default)]
    team_context: TeamContext,
}

/// POST /api/matches/:matchId/events/raw: parse a commentary line against
/// the match team's roster and store the resulting event.
async fn create_raw_event(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
    Json(req): Json<RawEventRequest>,
) -> ApiResponse {
    let m = match load_match(&state, match_id) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let opponents: Vec<&str> = if m.opponent_name.is_empty() {
        Vec::new()
    } else {
        vec![m.opponent_name.as_str()]
    };

    let parsed = match state.parser.parse_and_enrich_in_context(
        &req.raw_text,
        &state.store,
        m.team_id,
        &opponents[..],
        req.team_context,
    ) {
        Ok(parsed) => parsed,
        Err(e) => return error_response(&e),
    };

    if parsed.is_unknown() {
        return error_body(
            StatusCode::BAD_REQUEST,
            format!("Could not parse event: {}", req.raw_text),
        );
    }

    let metadata = match serde_json::to_value(&parsed) {
        Ok(v) => v,
        Err(e) => return error_response(&touchline_core::Error::from(e)),
    };

    let new_event = NewEvent {
        match_id,
        minute: parsed.minute,
        event_type: parsed.event_type.to_string(),
        team_context: Some(req.team_context.to_string()),
        player_id: parsed.player_id,
        raw_text: Some(req.raw_text.clone()),
        metadata: Some(metadata),
    };

    match state.store.add_event(&new_event) {
        Ok(id) => {
            info!(
                "Stored {} event {} for match {} from '{}'",
                parsed.event_type, id, match_id, req.raw_text
            );
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "id": id,
                    "match_id": match_id,
                    "event_type": parsed.event_type,
                    "player_id": parsed.player_id,
                    "minute": parsed.minute,
                    "team_context": req.team_context,
                    "raw_text": req.raw_text,
                    "parsed": parsed,
                })),
            )
        }
        Err(e) => error_response(&e),
    }
}

// ---------------------------------------------------------------
// Structured events
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct CreateEventRequest {
    #[serde(default)]
    minute: Option<u32>,
    event_type: String,
    #[serde(default)]
    team_context: TeamContext,
    #[serde(default)]
    player_id: Option<i64>,
    #[serde(default)]
    raw_text: Option<String>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

/// POST /api/matches/:matchId/events: store an already-structured event.
async fn create_event(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
    Json(req): Json<CreateEventRequest>,
) -> ApiResponse {
    let m = match load_match(&state, match_id) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    match serde_json::from_value::<EventType>(serde_json::Value::String(req.event_type.clone())) {
        Ok(t) if t != EventType::Unknown => {}
        _ => {
            return error_body(
                StatusCode::BAD_REQUEST,
                format!("Unsupported event_type: {}", req.event_type),
            )
        }
    }

    if let Some(meta) = &req.metadata {
        if !meta.is_object() {
            return error_body(StatusCode::BAD_REQUEST, "metadata must be a JSON object");
        }
    }

    if let Some(player_id) = req.player_id {
        match state.store.get_player(player_id) {
            Ok(Some(p)) if p.team_id != m.team_id => {
                return error_body(
                    StatusCode::BAD_REQUEST,
                    "Player must belong to the match team",
                )
            }
            Ok(Some(_)) => {}
            Ok(None) => return error_body(StatusCode::NOT_FOUND, "Player not found"),
            Err(e) => return error_response(&e),
        }
    }

    let new_event = NewEvent {
        match_id,
        minute: req.minute,
        event_type: req.event_type,
        team_context: Some(req.team_context.to_string()),
        player_id: req.player_id,
        raw_text: req.raw_text,
        metadata: req.metadata,
    };

    let created = state
        .store
        .add_event(&new_event)
        .and_then(|id| state.store.get_event(id));
    match created {
        Ok(Some(event)) => (StatusCode::CREATED, Json(serde_json::json!(event))),
        Ok(None) => error_body(StatusCode::INTERNAL_SERVER_ERROR, "Event vanished after insert"),
        Err(e) => error_response(&e),
    }
}

/// GET /api/matches/:matchId/events: ordered by minute.
async fn list_events(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
) -> ApiResponse {
    if let Err(resp) = load_match(&state, match_id) {
        return resp;
    }
    match state.store.list_events_for_match(match_id) {
        Ok(events) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "events": events,
                "total": events.len(),
            })),
        ),
        Err(e) => error_response(&e),
    }
}
