//! Club, team, player and roster routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::{error_body, error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clubs", post(create_club).get(list_clubs))
        .route("/teams", post(create_team).get(list_teams))
        .route("/teams/{team_id}/roster", get(get_roster))
        .route("/players", post(create_player).get(list_players))
        .route("/players/{player_id}/stats", get(get_player_stats))
}

#[derive(Deserialize)]
struct CreateClubRequest {
    name: String,
}

/// POST /api/clubs
async fn create_club(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateClubRequest>,
) -> ApiResponse {
    let created = state
        .store
        .add_club(&req.name)
        .and_then(|id| state.store.get_club(id));
    match created {
        Ok(Some(club)) => (StatusCode::CREATED, Json(serde_json::json!(club))),
        Ok(None) => error_body(StatusCode::INTERNAL_SERVER_ERROR, "Club vanished after insert"),
        Err(e) => error_response(&e),
    }
}

/// GET /api/clubs
async fn list_clubs(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.list_clubs() {
        Ok(clubs) => (StatusCode::OK, Json(serde_json::json!(clubs))),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct CreateTeamRequest {
    #[serde(default)]
    club_id: Option<i64>,
    name: String,
    #[serde(default)]
    age_group: Option<String>,
}

/// POST /api/teams
async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTeamRequest>,
) -> ApiResponse {
    let created = state
        .store
        .add_team(req.club_id, &req.name, req.age_group.as_deref())
        .and_then(|id| state.store.get_team(id));
    match created {
        Ok(Some(team)) => (StatusCode::CREATED, Json(serde_json::json!(team))),
        Ok(None) => error_body(StatusCode::INTERNAL_SERVER_ERROR, "Team vanished after insert"),
        Err(e) => error_response(&e),
    }
}

/// GET /api/teams
async fn list_teams(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.list_teams() {
        Ok(teams) => (StatusCode::OK, Json(serde_json::json!(teams))),
        Err(e) => error_response(&e),
    }
}

/// GET /api/teams/:teamId/roster: players in id order.
async fn get_roster(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<i64>,
) -> ApiResponse {
    match state.store.get_team(team_id) {
        Ok(Some(_)) => {}
        Ok(None) => return error_body(StatusCode::NOT_FOUND, "Team not found"),
        Err(e) => return error_response(&e),
    }
    match state.store.get_team_roster(team_id) {
        Ok(players) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "team_id": team_id,
                "players": players,
                "total": players.len(),
            })),
        ),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct CreatePlayerRequest {
    team_id: i64,
    name: String,
    #[serde(default)]
    position: Option<String>,
}

/// POST /api/players
async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePlayerRequest>,
) -> ApiResponse {
    let created = state
        .store
        .add_player(req.team_id, &req.name, req.position.as_deref())
        .and_then(|id| state.store.get_player(id));
    match created {
        Ok(Some(player)) => (StatusCode::CREATED, Json(serde_json::json!(player))),
        Ok(None) => error_body(StatusCode::INTERNAL_SERVER_ERROR, "Player vanished after insert"),
        Err(e) => error_response(&e),
    }
}

/// GET /api/players
async fn list_players(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.list_players() {
        Ok(players) => (StatusCode::OK, Json(serde_json::json!(players))),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct StatsQuery {
    match_id: Option<i64>,
}

/// GET /api/players/:playerId/stats?match_id=: event counts by type.
async fn get_player_stats(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
    Query(query): Query<StatsQuery>,
) -> ApiResponse {
    match state.store.get_player(player_id) {
        Ok(Some(_)) => {}
        Ok(None) => return error_body(StatusCode::NOT_FOUND, "Player not found"),
        Err(e) => return error_response(&e),
    }
    match state.store.player_event_counts(player_id, query.match_id) {
        Ok(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "player_id": player_id,
                "match_id": query.match_id,
                "stats": stats,
                "computed_at": chrono::Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::{seed, test_state};
    use touchline_store::NewEvent;

    #[tokio::test]
    async fn test_create_team_and_player() {
        let (state, _dir) = test_state();
        let (status, Json(team)) = create_team(
            State(state.clone()),
            Json(CreateTeamRequest {
                club_id: None,
                name: "Riverside U12".into(),
                age_group: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let team_id = team["id"].as_i64().unwrap();

        let (status, Json(player)) = create_player(
            State(state.clone()),
            Json(CreatePlayerRequest {
                team_id,
                name: "Kip".into(),
                position: Some("Defence".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(player["name"], "Kip");
        assert_eq!(player["team_id"], team_id);
    }

    #[tokio::test]
    async fn test_clubs_teams_players_listing() {
        let (state, _dir) = test_state();
        let (status, Json(club)) = create_club(
            State(state.clone()),
            Json(CreateClubRequest {
                name: "Winchester FC".into(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let club_id = club["id"].as_i64().unwrap();

        let (status, Json(team)) = create_team(
            State(state.clone()),
            Json(CreateTeamRequest {
                club_id: Some(club_id),
                name: "U9 Reds".into(),
                age_group: Some("U9".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(team["club_id"], club_id);
        let team_id = team["id"].as_i64().unwrap();
        for name in ["Winston", "Tommy"] {
            create_player(
                State(state.clone()),
                Json(CreatePlayerRequest {
                    team_id,
                    name: name.into(),
                    position: None,
                }),
            )
            .await;
        }

        let (status, Json(clubs)) = list_clubs(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(clubs[0]["name"], "Winchester FC");

        let (_, Json(teams)) = list_teams(State(state.clone())).await;
        assert_eq!(teams.as_array().unwrap().len(), 1);
        assert_eq!(teams[0]["name"], "U9 Reds");

        let (_, Json(players)) = list_players(State(state.clone())).await;
        assert_eq!(players.as_array().unwrap().len(), 2);
        assert_eq!(players[1]["name"], "Tommy");
        assert_eq!(players[1]["team_id"], team_id);

        let (status, _) = create_team(
            State(state),
            Json(CreateTeamRequest {
                club_id: Some(999),
                name: "Ghosts".into(),
                age_group: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_player_unknown_team() {
        let (state, _dir) = test_state();
        let (status, _) = create_player(
            State(state),
            Json(CreatePlayerRequest {
                team_id: 99,
                name: "Kip".into(),
                position: None,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_roster() {
        let (state, _dir) = test_state();
        let (team, _) = seed(&state);
        let (status, Json(body)) = get_roster(State(state.clone()), Path(team)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["players"][1]["name"], "Winston");
        assert_eq!(body["players"][1]["position"], "Striker");

        let (status, _) = get_roster(State(state), Path(404)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_player_stats() {
        let (state, _dir) = test_state();
        let (team, m) = seed(&state);
        let winston = state.store.get_team_roster(team).unwrap()[1].id;
        for kind in ["goal", "goal", "shot"] {
            state
                .store
                .add_event(&NewEvent {
                    match_id: m,
                    event_type: kind.into(),
                    player_id: Some(winston),
                    ..Default::default()
                })
                .unwrap();
        }

        let (status, Json(body)) = get_player_stats(
            State(state.clone()),
            Path(winston),
            Query(StatsQuery { match_id: Some(m) }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["goal"], 2);
        assert_eq!(body["stats"]["shot"], 1);
        assert_eq!(body["match_id"], m);

        let (status, _) =
            get_player_stats(State(state), Path(999), Query(StatsQuery { match_id: None })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
