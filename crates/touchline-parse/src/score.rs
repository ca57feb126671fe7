//! String similarity scorers on a 0–100 scale.

use serde::{Deserialize, Serialize};

/// Available similarity metrics. Both ignore token order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    /// Indel ratio over sorted tokens. Case-sensitive.
    #[default]
    TokenSort,
    /// Jaro-Winkler over lowercased sorted tokens.
    JaroWinkler,
}

impl ScorerKind {
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            Self::TokenSort => token_sort_ratio(a, b),
            Self::JaroWinkler => token_sort_jaro_winkler(a, b),
        }
    }
}

/// Split on whitespace, sort, rejoin with single spaces.
fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// `indel_ratio` of the sorted-token forms.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    indel_ratio(&sort_tokens(a), &sort_tokens(b))
}

/// `100 * 2*LCS / (len_a + len_b)`, counted in chars. Two empty strings score 100.
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

pub fn token_sort_jaro_winkler(a: &str, b: &str) -> f64 {
    let a = sort_tokens(a).to_lowercase();
    let b = sort_tokens(b).to_lowercase();
    strsim::jaro_winkler(&a, &b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(token_sort_ratio("Winston", "Winston"), 100.0);
        assert_eq!(indel_ratio("", ""), 100.0);
    }

    #[test]
    fn test_token_order_ignored() {
        assert_eq!(token_sort_ratio("Stoneham FC", "FC Stoneham"), 100.0);
        assert_eq!(token_sort_ratio("FC  Stoneham ", "Stoneham FC"), 100.0);
    }

    #[test]
    fn test_known_ratios() {
        // LCS("Tom", "Tommy") = 3 → 200*3/8
        assert_eq!(token_sort_ratio("Tom", "Tommy"), 75.0);
        // LCS("Kip", "Kit") = 2 → 200*2/6
        assert!((token_sort_ratio("Kip", "Kit") - 66.666).abs() < 0.01);
        // Only "e" is shared; "L" and "l" differ.
        assert_eq!(token_sort_ratio("Leo", "Alex"), 200.0 * 1.0 / 7.0);
        assert_eq!(token_sort_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_case_sensitive() {
        assert!(token_sort_ratio("winston", "Winston") < 100.0);
    }

    #[test]
    fn test_jaro_winkler_scale() {
        assert_eq!(ScorerKind::JaroWinkler.score("winston", "Winston"), 100.0);
        let s = ScorerKind::JaroWinkler.score("Winstn", "Winston");
        assert!(s > 90.0 && s < 100.0);
        assert_eq!(ScorerKind::JaroWinkler.score("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_scorer_kind_serde() {
        let kind: ScorerKind = serde_json::from_str("\"token_sort\"").unwrap();
        assert_eq!(kind, ScorerKind::TokenSort);
    }
}
