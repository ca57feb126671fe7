//! Row types for teams, players, matches and events.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub club_id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub team_id: i64,
    pub opponent_name: String,
    /// RFC 3339 kickoff time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kickoff_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub created_at: i64,
}

/// A stored match event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub match_id: i64,
    pub minute: Option<u32>,
    pub event_type: String,
    pub team_context: String,
    pub player_id: Option<i64>,
    pub raw_text: Option<String>,
    /// Free-form payload; raw-text events keep the full parser output here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: i64,
}

/// Options for adding a match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMatch {
    pub team_id: i64,
    pub opponent_name: String,
    #[serde(default)]
    pub kickoff_at: Option<String>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

/// Options for adding an event.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub match_id: i64,
    pub minute: Option<u32>,
    pub event_type: String,
    pub team_context: Option<String>,
    pub player_id: Option<i64>,
    pub raw_text: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Ids of the rows created by a demo seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSeed {
    pub club_id: i64,
    pub team_id: i64,
    pub match_id: i64,
    pub player_ids: Vec<i64>,
}

/// Store-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub clubs: i64,
    pub teams: i64,
    pub players: i64,
    pub matches: i64,
    pub events: i64,
    pub db_path: String,
    pub db_size_mb: f64,
}
