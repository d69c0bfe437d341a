//! The static blueprint index.
//!
//! Built once at startup from the exported game data and never mutated
//! afterwards. Iteration order is the order records appear in the file.

pub mod loader;

use serde::Deserialize;

pub use loader::load_index;

/// A single game object definition.
#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintRecord {
    /// Unique blueprint identifier, e.g. "Snapjaw Scavenger".
    pub id: String,
    /// Human-readable display name. Not guaranteed unique.
    pub displayname: String,
    /// Original serialized source markup for the object.
    pub source: String,
}

/// Insertion-ordered collection of blueprint records.
///
/// Ids are stored case-sensitively; lookups over the index are expected
/// to be case-insensitive and are provided by [`crate::search`].
#[derive(Debug, Default)]
pub struct BlueprintIndex {
    records: Vec<BlueprintRecord>,
}

impl BlueprintIndex {
    pub fn new(records: Vec<BlueprintRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BlueprintRecord] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&BlueprintRecord> {
        self.records.get(position)
    }

    /// Blueprint ids in index order.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Display names in index order.
    pub fn display_names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.displayname.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> BlueprintRecord {
        BlueprintRecord {
            id: id.to_string(),
            displayname: name.to_string(),
            source: format!("<object Name=\"{}\" />", id),
        }
    }

    #[test]
    fn test_index_preserves_insertion_order() {
        let index = BlueprintIndex::new(vec![
            record("Zeta", "zeta"),
            record("Alpha", "alpha"),
            record("Mu", "mu"),
        ]);
        assert_eq!(index.ids(), vec!["Zeta", "Alpha", "Mu"]);
        assert_eq!(index.display_names(), vec!["zeta", "alpha", "mu"]);
    }

    #[test]
    fn test_get_by_position() {
        let index = BlueprintIndex::new(vec![record("A", "a"), record("B", "b")]);
        assert_eq!(index.get(1).unwrap().id, "B");
        assert!(index.get(2).is_none());
    }
}
