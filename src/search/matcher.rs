//! String similarity scoring.
//!
//! Scores are integers in [0, 100], case-insensitive, with 100 reserved
//! for strings that are equal after normalization. Ranking combines a
//! plain edit-distance ratio with a token-sorted one so that word order
//! ("scavenger snapjaw" vs "snapjaw scavenger") does not bury a match.

/// A scored candidate produced by a single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub value: String,
    pub score: u8,
}

/// Similarity score between a query and a candidate, in [0, 100].
pub fn score(query: &str, candidate: &str) -> u8 {
    let q = query.to_lowercase();
    let c = candidate.to_lowercase();
    ratio(&q, &c).max(ratio(&token_sort(&q), &token_sort(&c)))
}

/// Rank `candidates` against `query` and return the top `limit`, sorted
/// by descending score. Ties keep candidate-list order.
pub fn extract(query: &str, candidates: &[String], limit: usize) -> Vec<MatchCandidate> {
    let mut scored: Vec<MatchCandidate> = candidates
        .iter()
        .map(|candidate| MatchCandidate {
            value: candidate.clone(),
            score: score(query, candidate),
        })
        .collect();

    // Stable sort keeps earlier candidates ahead on equal scores.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// The single best match for `query`, or None for an empty candidate list.
pub fn extract_one(query: &str, candidates: &[String]) -> Option<MatchCandidate> {
    extract(query, candidates, 1).into_iter().next()
}

/// Normalized edit-distance similarity scaled to [0, 100].
fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Whitespace tokens sorted and rejoined, for order-insensitive comparison.
fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical_strings_score_100() {
        assert_eq!(score("Glowfish", "Glowfish"), 100);
    }

    #[test]
    fn test_scoring_is_case_insensitive() {
        assert_eq!(score("glowfish", "GLOWFISH"), 100);
    }

    #[test]
    fn test_word_order_ignored() {
        assert_eq!(score("scavenger snapjaw", "Snapjaw Scavenger"), 100);
    }

    #[test]
    fn test_unrelated_strings_score_low() {
        assert!(score("glowfish", "chrome pyramid") < 40);
    }

    #[test]
    fn test_extract_respects_limit_and_ordering() {
        let list = candidates(&["glowfish", "glowmoth", "glowpad", "chrome pyramid", "glow wisp"]);
        let matches = extract("glow", &list, 3);
        assert_eq!(matches.len(), 3);
        assert!(matches[0].score >= matches[1].score);
        assert!(matches[1].score >= matches[2].score);
    }

    #[test]
    fn test_extract_verbatim_candidate_ranks_first() {
        let list = candidates(&["chrome pyramid", "glowfish", "snapjaw scavenger"]);
        let matches = extract("glowfish", &list, 5);
        assert_eq!(matches[0].value, "glowfish");
        assert_eq!(matches[0].score, 100);
    }

    #[test]
    fn test_extract_ties_keep_candidate_order() {
        // Both candidates are equally distant from the query.
        let list = candidates(&["ab", "ba"]);
        let matches = extract("aa", &list, 2);
        assert_eq!(matches[0].value, "ab");
    }

    #[test]
    fn test_extract_one_empty_candidates() {
        assert!(extract_one("anything", &[]).is_none());
    }

    #[test]
    fn test_extract_one_returns_best() {
        let list = candidates(&["salthopper", "glowfish", "girshling"]);
        let best = extract_one("glowfush", &list).unwrap();
        assert_eq!(best.value, "glowfish");
    }
}
