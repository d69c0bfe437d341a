//! Ongoing-preservation registry.
//!
//! Tracks (source channel, destination channel) pairs registered with
//! `preserve future pins from ...`. Held in shared bot state for the
//! process lifetime; not persisted across restarts.

use std::collections::HashSet;

use crate::common::error::PreserveError;

/// Set of channels being watched for future pins.
#[derive(Debug, Default)]
pub struct OngoingPreservations {
    pairs: HashSet<(String, String)>,
}

impl OngoingPreservations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a (source, destination) pair. Re-adding is a no-op.
    pub fn add(&mut self, source: &str, destination: &str) {
        self.pairs
            .insert((source.to_string(), destination.to_string()));
    }

    /// Remove a pair, erroring if it was never registered.
    pub fn remove(&mut self, source: &str, destination: &str) -> Result<(), PreserveError> {
        if self
            .pairs
            .remove(&(source.to_string(), destination.to_string()))
        {
            Ok(())
        } else {
            Err(PreserveError::NotRegistered {
                source_channel: source.to_string(),
                destination: destination.to_string(),
            })
        }
    }

    pub fn contains(&self, source: &str, destination: &str) -> bool {
        self.pairs
            .contains(&(source.to_string(), destination.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sorted snapshot of the registered pairs, for `preserve what`.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self.pairs.iter().cloned().collect();
        pairs.sort();
        pairs
    }
}
