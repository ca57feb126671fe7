//! Parser configuration: keyword catalogue, stopwords, match threshold.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::score::ScorerKind;
use crate::types::EventType;

/// Minimum similarity (0–100) for a fuzzy name match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 75.0;

/// Default intent catalogue. Order is priority: the first entry with a
/// keyword hit wins, regardless of where the keyword sits in the text.
pub const DEFAULT_INTENTS: &[(EventType, &[&str])] = &[
    (EventType::Goal, &["goal", "scored", "scores"]),
    (EventType::Save, &["save", "saved"]),
    (EventType::Tackle, &["tackle", "tackled"]),
    (EventType::Pass, &["pass", "passed", "completion"]),
    (EventType::Shot, &["shot", "shoots", "miss", "on target"]),
    (EventType::Sub, &["sub", "substitute", "in", "out"]),
    (EventType::Corner, &["corner"]),
    (EventType::Foul, &["foul"]),
    (EventType::Assist, &["assist"]),
];

/// Words that are never player names, on top of the catalogue's tags and keywords.
pub const BASE_STOPWORDS: &[&str] = &[
    "minute", "min", "mins", "vs", "v", "out", "in", "the", "a", "an", "and", "then", "from",
    "to", "for", "at", "on", "off", "it", "of", "well", "done", "great",
];

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRule {
    pub event_type: EventType,
    pub keywords: Vec<String>,
}

/// Parser configuration (optionally persisted to parser-config.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_intents")]
    pub intents: Vec<IntentRule>,
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
    #[serde(default = "default_threshold")]
    pub match_threshold: f64,
    #[serde(default)]
    pub scorer: ScorerKind,
}

fn default_intents() -> Vec<IntentRule> {
    DEFAULT_INTENTS
        .iter()
        .map(|(event_type, keywords)| IntentRule {
            event_type: *event_type,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

fn default_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            intents: default_intents(),
            extra_stopwords: Vec::new(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            scorer: ScorerKind::default(),
        }
    }
}

impl ParserConfig {
    /// Load config from file, falling back to defaults.
    ///
    /// `TOUCHLINE_MATCH_THRESHOLD` overrides the file's threshold.
    pub fn load(config_path: &Path) -> Self {
        let mut config: ParserConfig = match std::fs::read_to_string(config_path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(c) => {
                    info!("Loaded parser config from {}", config_path.display());
                    c
                }
                Err(e) => {
                    warn!("Ignoring invalid parser config {}: {}", config_path.display(), e);
                    ParserConfig::default()
                }
            },
            Err(_) => ParserConfig::default(),
        };

        if let Some(threshold) = std::env::var("TOUCHLINE_MATCH_THRESHOLD")
            .ok()
            .and_then(|t| t.parse::<f64>().ok())
        {
            config.match_threshold = threshold;
        }

        if !(0.0..=100.0).contains(&config.match_threshold) {
            warn!(
                "Match threshold {} outside 0-100, using {}",
                config.match_threshold, DEFAULT_MATCH_THRESHOLD
            );
            config.match_threshold = DEFAULT_MATCH_THRESHOLD;
        }

        config
    }
}
