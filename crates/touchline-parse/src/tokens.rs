//! Candidate player-name tokens: capitalized words that are not stopwords.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{IntentRule, ParserConfig, BASE_STOPWORDS};

static CAPITALIZED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("valid token regex"));

static DEFAULT_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    let config = ParserConfig::default();
    build_stopwords(&config.intents, &config.extra_stopwords)
});

/// Stopword set for a catalogue: base words, intent tags, single-word keywords.
pub fn build_stopwords(intents: &[IntentRule], extra: &[String]) -> HashSet<String> {
    let mut stopwords: HashSet<String> = BASE_STOPWORDS.iter().map(|w| w.to_string()).collect();
    for rule in intents {
        stopwords.insert(rule.event_type.as_str().to_string());
        for keyword in &rule.keywords {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty() && !keyword.contains(char::is_whitespace) {
                stopwords.insert(keyword);
            }
        }
    }
    stopwords.extend(extra.iter().map(|w| w.trim().to_lowercase()));
    stopwords
}

/// Capitalized, non-stopword words in left-to-right order.
///
/// Any capitalized word that is not a stopword passes, so non-player proper
/// nouns ("Stoneham") are candidates too; resolution filters them out.
pub fn candidate_tokens_with<'t>(text: &'t str, stopwords: &HashSet<String>) -> Vec<&'t str> {
    CAPITALIZED_WORD
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|t| !stopwords.contains(&t.to_lowercase()))
        .collect()
}

/// Candidate tokens using the default stopword set.
pub fn candidate_tokens(text: &str) -> Vec<&str> {
    candidate_tokens_with(text, &DEFAULT_STOPWORDS)
}
