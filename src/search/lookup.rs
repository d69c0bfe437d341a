//! Blueprint lookup over the index.
//!
//! Exact matches scan the index directly. Fuzzy matching over the full id
//! list can take a couple of seconds, so those calls are offloaded to the
//! blocking pool and awaited, keeping other commands flowing in the
//! meantime.

use std::sync::Arc;

use tracing::debug;

use crate::index::{BlueprintIndex, BlueprintRecord};
use crate::search::matcher::{self, MatchCandidate};

/// A fuzzy match re-resolved to its index position.
#[derive(Debug, Clone)]
pub struct PositionedMatch {
    pub position: usize,
    pub value: String,
    pub score: u8,
}

/// Results of one `search` call: id matches and display-name matches,
/// each already capped and sorted by descending score.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub id_matches: Vec<PositionedMatch>,
    pub name_matches: Vec<PositionedMatch>,
}

/// Read-only lookup service over the blueprint index.
///
/// Caches the id and display-name lists up front so each query clones two
/// `Arc`s instead of the lists themselves.
pub struct BlueprintLookup {
    index: Arc<BlueprintIndex>,
    ids: Arc<Vec<String>>,
    display_names: Arc<Vec<String>>,
}

impl BlueprintLookup {
    pub fn new(index: Arc<BlueprintIndex>) -> Self {
        let ids = Arc::new(index.ids());
        let display_names = Arc::new(index.display_names());
        Self {
            index,
            ids,
            display_names,
        }
    }

    pub fn index(&self) -> &BlueprintIndex {
        &self.index
    }

    /// Case-insensitive exact match: ids first, then display names.
    ///
    /// Returns the first hit in index order. When display names collide
    /// the earliest record wins, which may not be the one the user meant;
    /// that ambiguity is deliberate (see DESIGN.md).
    pub fn find_exact(&self, query: &str) -> Option<&BlueprintRecord> {
        let query = query.to_lowercase();

        self.index
            .records()
            .iter()
            .find(|record| record.id.to_lowercase() == query)
            .or_else(|| {
                self.index
                    .records()
                    .iter()
                    .find(|record| record.displayname.to_lowercase() == query)
            })
    }

    /// Best single fuzzy match over the id list.
    ///
    /// Used as a suggestion when exact lookup fails. Runs on the blocking
    /// pool; panics only if that pool is shut down mid-call.
    pub async fn find_closest(&self, query: &str) -> Option<MatchCandidate> {
        let query = query.to_string();
        let ids = Arc::clone(&self.ids);

        tokio::task::spawn_blocking(move || matcher::extract_one(&query, &ids))
            .await
            .expect("fuzzy match task panicked")
    }

    /// Fuzzy-rank the query against ids and display names independently.
    ///
    /// The two passes run concurrently on the blocking pool. Each match is
    /// re-resolved to an index position by first-occurrence value lookup in
    /// its original list, so a duplicated display name always resolves to
    /// its first record.
    pub async fn search(&self, query: &str, limit: usize) -> SearchResults {
        let id_task = {
            let query = query.to_string();
            let ids = Arc::clone(&self.ids);
            tokio::task::spawn_blocking(move || matcher::extract(&query, &ids, limit))
        };
        let name_task = {
            let query = query.to_string();
            let names = Arc::clone(&self.display_names);
            tokio::task::spawn_blocking(move || matcher::extract(&query, &names, limit))
        };

        let (id_matches, name_matches) = tokio::join!(id_task, name_task);
        let id_matches = id_matches.expect("id match task panicked");
        let name_matches = name_matches.expect("display name match task panicked");

        debug!(
            "search '{}': {} id matches, {} display name matches",
            query,
            id_matches.len(),
            name_matches.len()
        );

        SearchResults {
            id_matches: resolve_positions(id_matches, &self.ids),
            name_matches: resolve_positions(name_matches, &self.display_names),
        }
    }
}

/// Map matched values back to positions in the candidate list they came
/// from. First occurrence wins.
fn resolve_positions(matches: Vec<MatchCandidate>, candidates: &[String]) -> Vec<PositionedMatch> {
    matches
        .into_iter()
        .filter_map(|m| {
            candidates
                .iter()
                .position(|candidate| candidate == &m.value)
                .map(|position| PositionedMatch {
                    position,
                    value: m.value,
                    score: m.score,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::BlueprintRecord;

    fn record(id: &str, name: &str) -> BlueprintRecord {
        BlueprintRecord {
            id: id.to_string(),
            displayname: name.to_string(),
            source: format!("<object Name=\"{}\" />", id),
        }
    }

    fn lookup() -> BlueprintLookup {
        BlueprintLookup::new(Arc::new(BlueprintIndex::new(vec![
            record("Glowfish", "glowfish"),
            record("Snapjaw Scavenger", "snapjaw scavenger"),
            record("Snapjaw Hunter", "snapjaw hunter"),
            record("Chrome Pyramid", "chrome pyramid"),
        ])))
    }

    #[test]
    fn test_find_exact_case_insensitive() {
        let lookup = lookup();
        let upper = lookup.find_exact("GLOWFISH").unwrap();
        let lower = lookup.find_exact("glowfish").unwrap();
        assert_eq!(upper.id, "Glowfish");
        assert_eq!(lower.id, "Glowfish");
    }

    #[test]
    fn test_find_exact_by_display_name() {
        let lookup = lookup();
        let found = lookup.find_exact("snapjaw hunter").unwrap();
        assert_eq!(found.id, "Snapjaw Hunter");
    }

    #[test]
    fn test_find_exact_no_match() {
        assert!(lookup().find_exact("dromad").is_none());
    }

    #[test]
    fn test_display_name_collision_first_record_wins() {
        // Documents current behavior: the earliest record with a colliding
        // display name is returned, regardless of which one was meant.
        let lookup = BlueprintLookup::new(Arc::new(BlueprintIndex::new(vec![
            record("Bear1", "bear"),
            record("Bear2", "bear"),
        ])));
        assert_eq!(lookup.find_exact("bear").unwrap().id, "Bear1");
    }

    #[tokio::test]
    async fn test_find_closest_suggests_nearest_id() {
        let lookup = lookup();
        let closest = lookup.find_closest("glowfush").await.unwrap();
        assert_eq!(closest.value, "Glowfish");
    }

    #[tokio::test]
    async fn test_search_caps_both_lists() {
        let lookup = lookup();
        let results = lookup.search("snapjaw", 2).await;
        assert!(results.id_matches.len() <= 2);
        assert!(results.name_matches.len() <= 2);
    }

    #[tokio::test]
    async fn test_search_results_sorted_descending() {
        let results = lookup().search("snapjaw", 5).await;
        for pair in results.id_matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for pair in results.name_matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_search_verbatim_id_scores_maximum() {
        let results = lookup().search("Snapjaw Scavenger", 5).await;
        let top = &results.id_matches[0];
        assert_eq!(top.value, "Snapjaw Scavenger");
        assert_eq!(top.score, 100);
        assert_eq!(top.position, 1);
    }

    #[tokio::test]
    async fn test_search_duplicate_display_name_resolves_first_position() {
        let lookup = BlueprintLookup::new(Arc::new(BlueprintIndex::new(vec![
            record("Bear1", "bear"),
            record("Bear2", "bear"),
        ])));
        let results = lookup.search("bear", 5).await;
        // Both colliding names resolve to position 0; current behavior.
        assert!(results.name_matches.iter().all(|m| m.position == 0));
    }
}
