//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    // Validate Discord config
    if config.discord.token.is_empty() {
        errors.push("discord.token is required".to_string());
    }
    if config.discord.token == "YOUR_DISCORD_TOKEN_HERE" {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }
    if let Some(ref prefix) = config.discord.prefix {
        if prefix.is_empty() {
            errors.push("discord.prefix must not be empty".to_string());
        }
    }

    // Validate index config
    if config.index.path.is_empty() {
        errors.push("index.path is required".to_string());
    }

    // Validate role menus
    if let Some(ref roles) = config.roles {
        if roles.role_message_id == 0 {
            errors.push("roles.role_message_id must be non-zero".to_string());
        }
        if roles.entry_message_id == 0 {
            errors.push("roles.entry_message_id must be non-zero".to_string());
        }
        validate_menu("roles.role_menu", &roles.role_menu, &mut errors);
        validate_menu("roles.entry_menu", &roles.entry_menu, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

fn validate_menu(
    section: &str,
    menu: &std::collections::HashMap<String, String>,
    errors: &mut Vec<String>,
) {
    for (emoji, role) in menu {
        if emoji.is_empty() {
            errors.push(format!("{} contains an empty emoji key", section));
        } else if !is_plausible_emoji(emoji) {
            errors.push(format!(
                "{} key '{}' is neither a unicode emoji nor a custom emoji name",
                section, emoji
            ));
        }
        if role.is_empty() {
            errors.push(format!("{}['{}'] maps to an empty role name", section, emoji));
        }
    }
}

/// Accept unicode emoji and bare custom-emoji names (what the gateway
/// reports in `ReactionType`).
fn is_plausible_emoji(key: &str) -> bool {
    if emojis::get(key).is_some() {
        return true;
    }
    // Custom emoji names: word characters only, e.g. "qudsword".
    key.chars().all(|c| c.is_alphanumeric() || c == '_')
}
