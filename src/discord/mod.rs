//! Discord bot integration.
//!
//! Command dispatch, the blueprint/preserve command handlers and the
//! reaction role mirror.

pub mod blueprints;
pub mod bot;
pub mod commands;
pub mod cooldown;
pub mod handler;
pub mod preserve;
pub mod roles;

pub use bot::{build_client, BotState};
