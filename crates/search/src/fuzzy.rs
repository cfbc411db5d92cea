//! Fuzzy matching algorithms.
//!
//! Each query token is aligned against the best-matching substring of the
//! text (semi-global edit distance, free start and end in the text). The cost
//! of an alignment blends the normalized edit distance with a penalty for
//! starting far from the beginning of the text:
//!
//! ```text
//! cost = (1 - w) * d / |token| + w * p
//! p    = 0                                      if start <= distance
//!        min(1, (start - distance) / distance)  otherwise
//! ```
//!
//! where `w` is the configured location weight. A token matches when its
//! cheapest alignment costs at most the threshold.

use crate::config::SearchConfiguration;
use crate::normalize::{fold, FoldedText};

/// Half-open range of `char` indices into the original text.
pub type Span = (usize, usize);

/// A successful match of a query against one text.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Blended cost, `0.0` for a perfect match, never above the threshold
    pub score: f64,
    /// Sorted, non-overlapping spans of the text that matched
    pub spans: Vec<Span>,
}

/// A query split into folded tokens, reusable across many texts.
#[derive(Debug, Clone, Default)]
pub struct PreparedQuery {
    tokens: Vec<Vec<char>>,
}

impl PreparedQuery {
    /// Splits `query` on whitespace and folds each token.
    pub fn new(query: &str) -> Self {
        let tokens = query
            .split_whitespace()
            .map(|t| fold(t).chars().collect::<Vec<_>>())
            .filter(|t| !t.is_empty())
            .collect();
        Self { tokens }
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true for an empty or blank query.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Best alignment of one token.
#[derive(Debug, Clone, Copy)]
struct Alignment {
    cost: f64,
    start: usize,
    end: usize,
}

/// Matches `query` against `text`.
pub fn fuzzy_match(query: &str, text: &str, config: &SearchConfiguration) -> Option<MatchResult> {
    let prepared = PreparedQuery::new(query);
    match_prepared(&prepared, &FoldedText::new(text), config)
}

/// Matches a prepared query against already-folded text.
///
/// Tokens are matched independently. The field matches when at least one
/// token clears the threshold; the score is the mean cost of the matched
/// tokens, pulled toward the threshold by the share of tokens that missed.
pub fn match_prepared(
    query: &PreparedQuery,
    text: &FoldedText,
    config: &SearchConfiguration,
) -> Option<MatchResult> {
    if query.is_empty() || text.is_empty() {
        return None;
    }

    let threshold = config.threshold();
    let mut matched = 0usize;
    let mut cost_sum = 0.0;
    let mut spans = Vec::new();

    for token in &query.tokens {
        if token.len() < config.min_match_length() {
            continue;
        }
        let Some(best) = align(token, text.chars(), config) else {
            continue;
        };
        if best.cost > threshold {
            continue;
        }

        matched += 1;
        cost_sum += best.cost;
        if let Some(span) = text.original_span(best.start, best.end) {
            spans.push(span);
        }
    }

    if matched == 0 {
        return None;
    }

    let mean = cost_sum / matched as f64;
    let missed = 1.0 - matched as f64 / query.len() as f64;
    let score = (mean + missed * (threshold - mean)).clamp(0.0, threshold);

    Some(MatchResult {
        score,
        spans: merge_spans(spans),
    })
}

/// Finds the cheapest non-empty alignment of `token` inside `text`.
///
/// Ties on cost resolve to the latest end position.
fn align(token: &[char], text: &[char], config: &SearchConfiguration) -> Option<Alignment> {
    let m = token.len();
    let n = text.len();
    if m == 0 || n == 0 {
        return None;
    }

    // Each cell carries (edit distance, alignment start in text).
    let mut prev: Vec<(usize, usize)> = (0..=n).map(|j| (0, j)).collect();
    let mut curr = vec![(0usize, 0usize); n + 1];

    for i in 1..=m {
        curr[0] = (i, 0);
        for j in 1..=n {
            let sub = usize::from(token[i - 1] != text[j - 1]);
            let diag = (prev[j - 1].0 + sub, prev[j - 1].1);
            let up = (prev[j].0 + 1, prev[j].1);
            let left = (curr[j - 1].0 + 1, curr[j - 1].1);

            let mut best = diag;
            if up.0 < best.0 {
                best = up;
            }
            if left.0 < best.0 {
                best = left;
            }
            curr[j] = best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let w = config.location_weight();
    let mut best: Option<Alignment> = None;
    for (end, &(d, start)) in prev.iter().enumerate().skip(1) {
        if start >= end {
            continue;
        }
        let cost = (1.0 - w) * (d as f64 / m as f64)
            + w * location_penalty(start, config.distance());
        if best.is_none_or(|b| cost <= b.cost) {
            best = Some(Alignment { cost, start, end });
        }
    }
    best
}

/// Penalty in `[0, 1]` for a match starting at `start`.
#[inline]
fn location_penalty(start: usize, distance: usize) -> f64 {
    if start <= distance {
        return 0.0;
    }
    let over = (start - distance) as f64;
    (over / distance.max(1) as f64).min(1.0)
}

fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_unstable();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfiguration {
        SearchConfiguration::default()
    }

    #[test]
    fn test_exact_match_scores_zero() {
        let result = fuzzy_match("Toyota", "Toyota", &config()).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.spans, vec![(0, 6)]);
    }

    #[test]
    fn test_case_insensitive() {
        let result = fuzzy_match("TOYOTA", "toyota", &config()).unwrap();
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_accented_and_base_forms_match() {
        let a = fuzzy_match("oxigeno", "sensor oxígeno", &config()).unwrap();
        let b = fuzzy_match("oxígeno", "sensor oxigeno", &config()).unwrap();
        assert_eq!(a.score, 0.0);
        assert_eq!(b.score, 0.0);
        assert_eq!(a.spans, vec![(7, 14)]);
    }

    #[test]
    fn test_substring_match() {
        let result = fuzzy_match("radiador", "manguera radiador", &config()).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.spans, vec![(9, 17)]);
    }

    #[test]
    fn test_typo_within_threshold() {
        // one missing char out of five: 0.8 * 1/5
        let result = fuzzy_match("toyta", "Toyota", &config()).unwrap();
        assert!((result.score - 0.16).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_text_no_match() {
        assert!(fuzzy_match("chevrolet", "Toyota", &config()).is_none());
    }

    #[test]
    fn test_below_min_length_never_matches() {
        assert!(fuzzy_match("t", "Toyota", &config()).is_none());
        let strict = SearchConfiguration::builder()
            .min_match_length(7)
            .build()
            .unwrap();
        assert!(fuzzy_match("toyota", "Toyota", &strict).is_none());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(fuzzy_match("", "Toyota", &config()).is_none());
        assert!(fuzzy_match("   ", "Toyota", &config()).is_none());
        assert!(fuzzy_match("toyota", "", &config()).is_none());
    }

    #[test]
    fn test_threshold_boundary() {
        // 0.8 * 2/5 = 0.32
        let loose = SearchConfiguration::builder().threshold(0.33).build().unwrap();
        let strict = SearchConfiguration::builder().threshold(0.31).build().unwrap();
        assert!(fuzzy_match("toyxx", "toyota", &loose).is_some());
        assert!(fuzzy_match("toyxx", "toyota", &strict).is_none());
    }

    #[test]
    fn test_zero_threshold_requires_exact_substring() {
        let exact = SearchConfiguration::builder().threshold(0.0).build().unwrap();
        assert!(fuzzy_match("bomba", "bomba de agua", &exact).is_some());
        assert!(fuzzy_match("bompa", "bomba de agua", &exact).is_none());
    }

    #[test]
    fn test_location_penalty() {
        let near = SearchConfiguration::builder()
            .distance(0)
            .location_weight(0.5)
            .build()
            .unwrap();
        assert!(fuzzy_match("abc", "abcxxxx", &near).is_some());
        assert!(fuzzy_match("abc", "xxxxabc", &near).is_none());

        let far = SearchConfiguration::builder()
            .distance(100)
            .location_weight(0.5)
            .build()
            .unwrap();
        assert_eq!(fuzzy_match("abc", "xxxxabc", &far).unwrap().score, 0.0);
    }

    #[test]
    fn test_location_penalty_grows_and_caps() {
        assert_eq!(location_penalty(5, 10), 0.0);
        assert_eq!(location_penalty(15, 10), 0.5);
        assert_eq!(location_penalty(50, 10), 1.0);
        assert_eq!(location_penalty(3, 0), 1.0);
    }

    #[test]
    fn test_multi_word_all_tokens_match() {
        let result = fuzzy_match("sensor oxigeno", "sensor oxigeno", &config()).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.spans, vec![(0, 6), (7, 14)]);
    }

    #[test]
    fn test_multi_word_partial_match_is_pulled_toward_threshold() {
        // one of two tokens matches with cost 0: 0 + 0.5 * (0.3 - 0)
        let result = fuzzy_match("sensor zzzzzz", "sensor oxigeno", &config()).unwrap();
        assert!((result.score - 0.15).abs() < 1e-9);
        assert_eq!(result.spans, vec![(0, 6)]);
    }

    #[test]
    fn test_multi_word_no_token_matches() {
        assert!(fuzzy_match("zzzzzz qqqqqq", "sensor oxigeno", &config()).is_none());
    }

    #[test]
    fn test_merge_spans() {
        assert_eq!(merge_spans(vec![(4, 6), (0, 3), (2, 5)]), vec![(0, 6)]);
        assert_eq!(merge_spans(vec![(5, 7), (0, 2)]), vec![(0, 2), (5, 7)]);
    }

    #[test]
    fn test_alignment_edit_distance() {
        let unweighted = SearchConfiguration::builder()
            .location_weight(0.0)
            .threshold(1.0)
            .build()
            .unwrap();
        let cases = [
            ("sensr", "sensor oxigeno", 1),
            ("radiadr", "manguera radiador", 1),
            ("kia", "hyundai kia", 0),
            ("xyz", "abc", 3),
        ];
        for (q, t, expected) in cases {
            let token: Vec<char> = q.chars().collect();
            let text: Vec<char> = t.chars().collect();
            let best = align(&token, &text, &unweighted).unwrap();
            let d = best.cost * token.len() as f64;
            assert_eq!(d.round() as usize, expected, "{} in {}", q, t);
        }
    }

    #[test]
    fn test_hangul_syllables_are_distinct() {
        let exact = SearchConfiguration::builder().threshold(0.0).build().unwrap();
        assert!(fuzzy_match("한국", "학교", &exact).is_none());

        let result = fuzzy_match("한국", "한국 자동차", &exact).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.spans, vec![(0, 2)]);
    }
}
