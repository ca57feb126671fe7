//! Minute marker extraction ("minute 12", "12'", "7 mins").

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional marker word or apostrophe, then a one-or-two digit number.
static MARKED_MINUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(minute|min|’|'|)\s*([0-9]{1,2})\b").expect("valid minute regex"));

/// A number followed by an apostrophe or "min"/"mins".
static SUFFIXED_MINUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{1,2})('|\s*mins?)\b").expect("valid minute regex"));

/// Find a minute number in the text. No range check beyond two digits.
pub fn extract_minute(text: &str) -> Option<u32> {
    if let Some(caps) = MARKED_MINUTE.captures(text) {
        return caps.get(2).and_then(|m| m.as_str().parse().ok());
    }
    SUFFIXED_MINUTE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
