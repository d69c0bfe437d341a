//! Blueprint index file loading.
//!
//! The index is a JSON array of records exported from the game data:
//! `[{"id": "...", "displayname": "...", "source": "..."}, ...]`.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::common::error::IndexError;
use crate::index::{BlueprintIndex, BlueprintRecord};

/// Load the blueprint index from a JSON file.
///
/// Record order in the file becomes index iteration order. Duplicate ids
/// are a hard error since the rest of the bot assumes unique keys.
pub fn load_index(path: impl AsRef<Path>) -> Result<BlueprintIndex, IndexError> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|source| IndexError::IoError {
        path: path.display().to_string(),
        source,
    })?;

    let index = parse_index(&content)?;
    info!("Loaded {} blueprints from {}", index.len(), path.display());
    Ok(index)
}

/// Parse index records from a JSON string.
pub fn parse_index(content: &str) -> Result<BlueprintIndex, IndexError> {
    let records: Vec<BlueprintRecord> = serde_json::from_str(content)?;

    let mut seen = HashSet::new();
    for (position, record) in records.iter().enumerate() {
        if !seen.insert(record.id.as_str()) {
            return Err(IndexError::DuplicateId {
                id: record.id.clone(),
                position,
            });
        }
    }

    Ok(BlueprintIndex::new(records))
}
