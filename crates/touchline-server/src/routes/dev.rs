//! Development-only demo data routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use touchline_core::Result;
use touchline_store::DemoSeed;

use super::{error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dev/seed", post(seed))
        .route("/dev/reset", post(reset))
}

fn seed_response(result: Result<DemoSeed>) -> ApiResponse {
    match result {
        Ok(seeded) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "club_id": seeded.club_id,
                "team_id": seeded.team_id,
                "match_id": seeded.match_id,
                "player_ids": seeded.player_ids,
            })),
        ),
        Err(e) => error_response(&e),
    }
}

/// POST /api/dev/seed: add the demo club, team, players and match.
async fn seed(State(state): State<Arc<AppState>>) -> ApiResponse {
    seed_response(state.store.seed_demo_data())
}

/// POST /api/dev/reset: wipe every table, then seed.
async fn reset(State(state): State<Arc<AppState>>) -> ApiResponse {
    seed_response(state.store.reset_demo_data())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{seed as seed_fixture, test_state};
    use touchline_store::NewEvent;

    #[tokio::test]
    async fn test_seed_then_parse_against_demo_roster() {
        let (state, _dir) = test_state();
        let (status, Json(body)) = seed(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["player_ids"].as_array().unwrap().len(), 3);

        let team_id = body["team_id"].as_i64().unwrap();
        let roster = state.store.get_team_roster(team_id).unwrap();
        assert_eq!(roster[0].name, "Winston");
        assert_eq!(roster[0].position.as_deref(), Some("Striker"));
        let m = state.store.get_match(body["match_id"].as_i64().unwrap()).unwrap().unwrap();
        assert_eq!(m.opponent_name, "Stoneham FC");
        assert_eq!(m.competition.as_deref(), Some("League"));

        let parsed = state
            .parser
            .parse_and_enrich("Goal Winston 12'", &state.store, team_id, &["Stoneham FC"])
            .unwrap();
        assert_eq!(parsed.player_id, Some(roster[0].id));
        assert_eq!(parsed.minute, Some(12));
    }

    #[tokio::test]
    async fn test_reset_replaces_existing_rows() {
        let (state, _dir) = test_state();
        let (old_team, old_match) = seed_fixture(&state);
        state
            .store
            .add_event(&NewEvent {
                match_id: old_match,
                event_type: "goal".into(),
                ..Default::default()
            })
            .unwrap();

        let (status, Json(body)) = reset(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let stats = state.store.get_stats().unwrap();
        assert_eq!(stats.clubs, 1);
        assert_eq!(stats.teams, 1);
        assert_eq!(stats.players, 3);
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.events, 0);
        assert!(state.store.get_team(old_team).unwrap().is_none());
        assert_ne!(body["team_id"].as_i64().unwrap(), old_team);

        // Reset twice in a row stays at one demo set.
        reset(State(state.clone())).await;
        assert_eq!(state.store.get_stats().unwrap().teams, 1);
    }
}
