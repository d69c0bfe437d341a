//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `ARCHIVIST_DISCORD_TOKEN` - Discord bot token
//! - `ARCHIVIST_INDEX_PATH` - path to the blueprint index file
//! - `ARCHIVIST_DISCORD_GUILD_ID` - guild id
//! - `ARCHIVIST_CONFIG` - config file path

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "ARCHIVIST";

/// Apply environment variable overrides to a config.
///
/// This allows sensitive values like the bot token to be provided via
/// environment variables instead of the config file.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var(format!("{}_DISCORD_TOKEN", ENV_PREFIX)) {
        config.discord.token = token;
    }

    if let Ok(path) = env::var(format!("{}_INDEX_PATH", ENV_PREFIX)) {
        config.index.path = path;
    }

    if let Ok(guild_id) = env::var(format!("{}_DISCORD_GUILD_ID", ENV_PREFIX)) {
        if let Ok(id) = guild_id.parse() {
            config.discord.guild_id = Some(id);
        }
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `ARCHIVIST_CONFIG`, otherwise returns "archivist.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "archivist.conf".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    fn make_test_config() -> Config {
        Config {
            discord: DiscordConfig {
                token: "original_token".to_string(),
                guild_id: None,
                prefix: None,
            },
            index: IndexConfig {
                path: "blueprints.json".to_string(),
            },
            roles: None,
            ignore: None,
        }
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "ARCHIVIST");
    }

    #[test]
    fn test_get_config_path_default() {
        env::remove_var("ARCHIVIST_CONFIG");
        assert_eq!(get_config_path(), "archivist.conf");
    }

    #[test]
    fn test_apply_env_overrides_no_vars() {
        env::remove_var("ARCHIVIST_DISCORD_TOKEN");
        env::remove_var("ARCHIVIST_INDEX_PATH");

        let config = apply_env_overrides(make_test_config());

        // Should remain unchanged
        assert_eq!(config.discord.token, "original_token");
        assert_eq!(config.index.path, "blueprints.json");
    }
}
