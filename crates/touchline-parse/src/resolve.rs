//! Fuzzy resolution of a candidate token against a list of known names.

use once_cell::sync::Lazy;

use crate::config::DEFAULT_MATCH_THRESHOLD;
use crate::score::ScorerKind;

static DEFAULT_RESOLVER: Lazy<NameResolver> = Lazy::new(NameResolver::default);

/// Best-scoring name above a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameResolver {
    threshold: f64,
    scorer: ScorerKind,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD, ScorerKind::default())
    }
}

impl NameResolver {
    pub fn new(threshold: f64, scorer: ScorerKind) -> Self {
        Self { threshold, scorer }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Highest-scoring name and its score, ignoring the threshold.
    ///
    /// On equal scores the earliest name wins.
    pub fn best_match<'a, S: AsRef<str>>(
        &self,
        candidate: &str,
        names: &'a [S],
    ) -> Option<(&'a str, f64)> {
        let mut best: Option<(&'a str, f64)> = None;
        for name in names {
            let name = name.as_ref();
            let score = self.scorer.score(candidate, name);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((name, score));
            }
        }
        best
    }

    /// Resolve `candidate` to a name, or `None` if nothing reaches the threshold.
    pub fn resolve<'a, S: AsRef<str>>(&self, candidate: &str, names: &'a [S]) -> Option<&'a str> {
        if candidate.trim().is_empty() || names.is_empty() {
            return None;
        }
        self.best_match(candidate, names)
            .filter(|(_, score)| *score >= self.threshold)
            .map(|(name, _)| name)
    }
}

/// Resolve with the default threshold and scorer.
pub fn resolve<'a, S: AsRef<str>>(candidate: &str, names: &'a [S]) -> Option<&'a str> {
    DEFAULT_RESOLVER.resolve(candidate, names)
}
