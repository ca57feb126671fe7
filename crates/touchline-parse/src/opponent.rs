//! "vs <name>" clause detection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resolve::NameResolver;

static VS_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)vs\s+([a-z][a-z\s]+)").expect("valid opponent regex"));

/// Trimmed text after the first "vs", if any.
pub fn capture_opponent(text: &str) -> Option<&str> {
    VS_CLAUSE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Resolve the captured opponent against known names, falling back to the capture.
pub fn detect_opponent<S: AsRef<str>>(
    text: &str,
    opponent_names: &[S],
    resolver: &NameResolver,
) -> Option<String> {
    let captured = capture_opponent(text)?;
    let resolved = resolver.resolve(captured, opponent_names).unwrap_or(captured);
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_names() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_capture() {
        assert_eq!(capture_opponent("Pass from Alex vs Stoneham FC"), Some("Stoneham FC"));
        assert_eq!(capture_opponent("Goal VS  riverside  "), Some("riverside"));
        assert_eq!(capture_opponent("Goal Winston"), None);
        assert_eq!(capture_opponent("Goal vs 3"), None);
    }

    #[test]
    fn test_capture_stops_at_non_letters() {
        assert_eq!(capture_opponent("Shot vs Stoneham, minute 12"), Some("Stoneham"));
    }

    #[test]
    fn test_resolved_against_known_opponents() {
        let resolver = NameResolver::default();
        let known = ["Stoneham FC"];
        assert_eq!(
            detect_opponent("Corner vs Stoneham F", &known, &resolver),
            Some("Stoneham FC".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_capture() {
        let resolver = NameResolver::default();
        assert_eq!(
            detect_opponent("Goal vs Riverside Rovers", &["Stoneham FC"], &resolver),
            Some("Riverside Rovers".to_string())
        );
        assert_eq!(
            detect_opponent("Goal vs Riverside", &no_names(), &resolver),
            Some("Riverside".to_string())
        );
        assert_eq!(detect_opponent("Goal Kip", &["Stoneham FC"], &resolver), None);
    }
}
