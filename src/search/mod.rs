//! Fuzzy blueprint search.
//!
//! `matcher` holds the pure similarity scoring; `lookup` wraps it in a
//! service that runs queries off the event loop.

pub mod lookup;
pub mod matcher;

pub use lookup::BlueprintLookup;
