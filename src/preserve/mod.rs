//! Message preservation: command grammar and ongoing-preservation state.

pub mod grammar;
pub mod state;

pub use grammar::{parse_preserve, PreserveCommand, TemporalModifier};
pub use state::OngoingPreservations;
