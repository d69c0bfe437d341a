//! Configuration type definitions.

use std::collections::HashMap;

use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub index: IndexConfig,
    pub roles: Option<RolesConfig>,
    /// User ids whose reactions are ignored.
    pub ignore: Option<Vec<u64>>,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
    pub guild_id: Option<u64>,
    /// Command prefix, "?" when unset.
    pub prefix: Option<String>,
}

/// Blueprint index configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Path to the exported blueprint JSON file.
    pub path: String,
}

/// Reaction role menus.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// Message carrying the main role menu.
    pub role_message_id: u64,
    /// Message carrying the entry-role menu.
    pub entry_message_id: u64,
    /// Emoji -> role name for the main menu.
    pub role_menu: HashMap<String, String>,
    /// Emoji -> role name for the entry menu.
    pub entry_menu: HashMap<String, String>,
}

impl Config {
    /// Effective command prefix.
    pub fn prefix(&self) -> &str {
        self.discord.prefix.as_deref().unwrap_or("?")
    }

    /// Ignored user ids, empty when unset.
    pub fn ignored_users(&self) -> &[u64] {
        self.ignore.as_deref().unwrap_or(&[])
    }
}
