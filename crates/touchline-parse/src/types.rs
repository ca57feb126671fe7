//! Parser output types.

use serde::{Deserialize, Serialize};

/// Event type tag assigned to a commentary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Goal,
    Save,
    Tackle,
    Pass,
    Shot,
    Sub,
    Corner,
    Foul,
    Assist,
    /// No keyword matched.
    Unknown,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Save => "save",
            Self::Tackle => "tackle",
            Self::Pass => "pass",
            Self::Shot => "shot",
            Self::Sub => "sub",
            Self::Corner => "corner",
            Self::Foul => "foul",
            Self::Assist => "assist",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side an event is attributed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamContext {
    /// The tracked team; its roster applies.
    #[default]
    Us,
    /// The opposing team; no roster is available.
    Opponent,
}

impl TeamContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Opponent => "opponent",
        }
    }
}

impl std::fmt::Display for TeamContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of parsing one commentary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub event_type: EventType,
    pub minute: Option<u32>,
    /// Roster name the player token resolved to.
    pub player_name: Option<String>,
    /// The token as it appeared in the text.
    pub player_name_raw: Option<String>,
    pub opponent: Option<String>,
    pub raw_text: String,
}

impl ParsedEvent {
    pub fn is_unknown(&self) -> bool {
        self.event_type == EventType::Unknown
    }
}

/// A parsed event with roster identity attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedParsedEvent {
    #[serde(flatten)]
    pub parsed: ParsedEvent,
    pub player_id: Option<i64>,
    pub player_position: Option<String>,
}

impl From<ParsedEvent> for EnrichedParsedEvent {
    fn from(parsed: ParsedEvent) -> Self {
        Self {
            parsed,
            player_id: None,
            player_position: None,
        }
    }
}

impl std::ops::Deref for EnrichedParsedEvent {
    type Target = ParsedEvent;

    fn deref(&self) -> &ParsedEvent {
        &self.parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EventType::Goal).unwrap(), "\"goal\"");
        assert_eq!(serde_json::to_string(&EventType::Unknown).unwrap(), "\"unknown\"");
        let parsed: EventType = serde_json::from_str("\"corner\"").unwrap();
        assert_eq!(parsed, EventType::Corner);
    }

    #[test]
    fn test_enriched_event_is_flat() {
        let event = EnrichedParsedEvent {
            parsed: ParsedEvent {
                event_type: EventType::Goal,
                minute: Some(12),
                player_name: Some("Winston".into()),
                player_name_raw: Some("Winston".into()),
                opponent: None,
                raw_text: "Goal Winston minute 12".into(),
            },
            player_id: Some(3),
            player_position: Some("Striker".into()),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "goal");
        assert_eq!(json["minute"], 12);
        assert_eq!(json["player_id"], 3);
        assert!(json["opponent"].is_null());
        assert!(json.get("parsed").is_none());

        let back: EnrichedParsedEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
