//! Keyword-based intent classification.

use once_cell::sync::Lazy;

use crate::config::{IntentRule, ParserConfig};
use crate::types::EventType;

static DEFAULT_CLASSIFIER: Lazy<IntentClassifier> =
    Lazy::new(|| IntentClassifier::new(&ParserConfig::default().intents));

/// Ordered (event type, keywords) table.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<(EventType, Vec<String>)>,
}

impl IntentClassifier {
    pub fn new(rules: &[IntentRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| {
                let keywords = rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (rule.event_type, keywords)
            })
            .collect();
        Self { rules }
    }

    /// Return the first event type whose keywords occur anywhere in the text.
    ///
    /// Matching is case-insensitive substring containment, so "in" also hits
    /// "Winston"; catalogue order decides between competing intents.
    pub fn classify(&self, text: &str) -> EventType {
        let text_lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text_lower.contains(k.as_str())))
            .map(|(event_type, _)| *event_type)
            .unwrap_or(EventType::Unknown)
    }

    /// Event types and keywords in priority order.
    pub fn rules(&self) -> impl Iterator<Item = (EventType, &[String])> {
        self.rules.iter().map(|(t, k)| (*t, k.as_slice()))
    }
}

/// Classify with the default catalogue.
pub fn classify(text: &str) -> EventType {
    DEFAULT_CLASSIFIER.classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_INTENTS;

    #[test]
    fn test_every_keyword_classifies_to_its_intent() {
        for (event_type, keywords) in DEFAULT_INTENTS {
            for keyword in *keywords {
                assert_eq!(classify(keyword), *event_type, "keyword {:?}", keyword);
            }
        }
    }

    #[test]
    fn test_classify_goal() {
        assert_eq!(classify("Goal Winston"), EventType::Goal);
        assert_eq!(classify("Winston SCORES"), EventType::Goal);
    }

    #[test]
    fn test_catalogue_order_beats_text_order() {
        // "save" appears first in the text, but goal is earlier in the catalogue.
        assert_eq!(classify("save then goal"), EventType::Goal);
        // "Winston" contains "in" but tackle outranks sub.
        assert_eq!(classify("Winston tackled"), EventType::Tackle);
    }

    #[test]
    fn test_substring_keyword_hits() {
        assert_eq!(classify("Leo takes a shot"), EventType::Shot);
        assert_eq!(classify("Winston"), EventType::Sub);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("mumble mumble"), EventType::Unknown);
        assert_eq!(classify(""), EventType::Unknown);
    }

    #[test]
    fn test_custom_rules() {
        let classifier = IntentClassifier::new(&[IntentRule {
            event_type: EventType::Foul,
            keywords: vec!["Booked".into(), "  ".into()],
        }]);
        assert_eq!(classifier.classify("Kip booked"), EventType::Foul);
        assert_eq!(classifier.classify("Goal Kip"), EventType::Unknown);
        assert_eq!(classifier.rules().count(), 1);
    }
}
