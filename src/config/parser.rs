//! Configuration file parsing (HOCON format).

use std::path::Path;

use hocon::HoconLoader;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Load configuration from a HOCON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    HoconLoader::new()
        .load_file(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load configuration from a HOCON string.
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    HoconLoader::new()
        .load_str(content)
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let content = r#"
            discord { token = "abc" }
            index { path = "blueprints.json" }
        "#;
        let config = load_config_str(content).unwrap();
        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.index.path, "blueprints.json");
        assert_eq!(config.prefix(), "?");
        assert!(config.roles.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
            discord {
                token = "abc"
                prefix = "!"
            }
            index { path = "blueprints.json" }
            roles {
                role_message_id = 111
                entry_message_id = 222
                role_menu { "🐟" = "Fisher" }
                entry_menu { "✅" = "Citizen" }
            }
            ignore = [333, 444]
        "#;
        let config = load_config_str(content).unwrap();
        assert_eq!(config.prefix(), "!");
        let roles = config.roles.unwrap();
        assert_eq!(roles.role_message_id, 111);
        assert_eq!(roles.role_menu.get("🐟").unwrap(), "Fisher");
        assert_eq!(config.ignore.unwrap(), vec![333, 444]);
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(load_config("/nonexistent/archivist.conf").is_err());
    }
}
