//! Parse orchestrator: one commentary line in, one `ParsedEvent` out.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::ParserConfig;
use crate::intent::IntentClassifier;
use crate::minute::extract_minute;
use crate::opponent::detect_opponent;
use crate::resolve::NameResolver;
use crate::tokens::{build_stopwords, candidate_tokens_with};
use crate::types::{EventType, ParsedEvent};

static DEFAULT_PARSER: Lazy<CommandParser> = Lazy::new(CommandParser::default);

/// Configured parser. Immutable after construction and safe to share
/// between threads.
#[derive(Debug, Clone)]
pub struct CommandParser {
    classifier: IntentClassifier,
    stopwords: HashSet<String>,
    resolver: NameResolver,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

impl CommandParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            classifier: IntentClassifier::new(&config.intents),
            stopwords: build_stopwords(&config.intents, &config.extra_stopwords),
            resolver: NameResolver::new(config.match_threshold, config.scorer),
        }
    }

    /// Shared parser built from the default configuration.
    pub fn shared_default() -> &'static CommandParser {
        &DEFAULT_PARSER
    }

    pub fn classify(&self, text: &str) -> EventType {
        self.classifier.classify(text)
    }

    pub fn candidate_tokens<'t>(&self, text: &'t str) -> Vec<&'t str> {
        candidate_tokens_with(text, &self.stopwords)
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Turn raw commentary into a structured event.
    ///
    /// The first candidate token that resolves against the roster becomes
    /// the player; later tokens are never considered.
    pub fn parse<S, O>(&self, text: &str, roster_names: &[S], opponent_names: &[O]) -> ParsedEvent
    where
        S: AsRef<str>,
        O: AsRef<str>,
    {
        let event_type = self.classify(text);
        let minute = extract_minute(text);

        let (player_name_raw, player_name) = self
            .candidate_tokens(text)
            .into_iter()
            .find_map(|token| {
                self.resolver
                    .resolve(token, roster_names)
                    .map(|name| (token.to_string(), name.to_string()))
            })
            .unzip();

        let opponent = detect_opponent(text, opponent_names, &self.resolver);

        debug!(
            "Parsed '{}' as {} (player={:?}, minute={:?}, opponent={:?})",
            text, event_type, player_name, minute, opponent
        );

        ParsedEvent {
            event_type,
            minute,
            player_name,
            player_name_raw,
            opponent,
            raw_text: text.to_string(),
        }
    }
}

/// Parse with the default configuration.
pub fn parse<S, O>(text: &str, roster_names: &[S], opponent_names: &[O]) -> ParsedEvent
where
    S: AsRef<str>,
    O: AsRef<str>,
{
    DEFAULT_PARSER.parse(text, roster_names, opponent_names)
}
