//! Touchline Parse: turns match commentary ("Goal Winston minute 12") into
//! structured events.
//!
//! The pipeline is heuristic: keyword intent classification, regex minute
//! extraction, capitalized-token candidates and fuzzy roster matching.
//! Everything here is a pure function of its inputs; the only external
//! state is the roster, which the caller supplies through [`RosterSource`].

pub mod config;
pub mod enrich;
pub mod intent;
pub mod minute;
pub mod opponent;
pub mod parser;
pub mod resolve;
pub mod score;
pub mod tokens;
pub mod types;

pub use config::{IntentRule, ParserConfig, DEFAULT_MATCH_THRESHOLD};
pub use enrich::{enrich, parse_and_enrich};
pub use intent::{classify, IntentClassifier};
pub use minute::extract_minute;
pub use parser::{parse, CommandParser};
pub use resolve::{resolve, NameResolver};
pub use score::ScorerKind;
pub use tokens::candidate_tokens;
pub use types::{EnrichedParsedEvent, EventType, ParsedEvent, TeamContext};

pub use touchline_core::{RosterEntry, RosterSource};
