//! Match routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use touchline_store::NewMatch;

use super::{error_body, error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/matches", post(create_match))
        .route("/matches/{match_id}", get(get_match))
}

/// POST /api/matches
async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewMatch>,
) -> ApiResponse {
    let created = state
        .store
        .add_match(&req)
        .and_then(|id| state.store.get_match(id));
    match created {
        Ok(Some(m)) => (StatusCode::CREATED, Json(serde_json::json!(m))),
        Ok(None) => error_body(StatusCode::INTERNAL_SERVER_ERROR, "Match vanished after insert"),
        Err(e) => error_response(&e),
    }
}

/// GET /api/matches/:matchId
async fn get_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<i64>,
) -> ApiResponse {
    match state.store.get_match(match_id) {
        Ok(Some(m)) => (StatusCode::OK, Json(serde_json::json!(m))),
        Ok(None) => error_body(StatusCode::NOT_FOUND, "Match not found"),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_create_and_get_match() {
        let (state, _dir) = test_state();
        let team = state.store.add_team(None, "Riverside U12", None).unwrap();

        let (status, Json(body)) = create_match(
            State(state.clone()),
            Json(NewMatch {
                team_id: team,
                opponent_name: "Stoneham FC".into(),
                kickoff_at: Some("2025-10-04T09:30:00+01:00".into()),
                competition: Some("League".into()),
                venue: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_i64().unwrap();

        let (status, Json(body)) = get_match(State(state), Path(id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opponent_name"], "Stoneham FC");
        assert_eq!(body["competition"], "League");
        assert!(body.get("venue").is_none());
    }

    #[tokio::test]
    async fn test_match_validation() {
        let (state, _dir) = test_state();
        let (status, _) = create_match(
            State(state.clone()),
            Json(NewMatch {
                team_id: 5,
                opponent_name: "Stoneham FC".into(),
                ..Default::default()
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let team = state.store.add_team(None, "Riverside U12", None).unwrap();
        let (status, _) = create_match(
            State(state.clone()),
            Json(NewMatch {
                team_id: team,
                opponent_name: "".into(),
                ..Default::default()
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_match(State(state), Path(77)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
