//! Error types for the application.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Preservation error: {0}")]
    Preserve(#[from] PreserveError),

    #[error("Role mirror error: {0}")]
    RoleMirror(#[from] RoleMirrorError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors raised while loading the blueprint index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to read index file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse index file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate blueprint id '{id}' at record {position}")]
    DuplicateId { id: String, position: usize },
}

/// Errors raised by the preserve command.
#[derive(Debug, Error)]
pub enum PreserveError {
    #[error("wrong syntax: {0}")]
    Syntax(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Cannot resolve message: {0}")]
    UnknownMessage(String),

    #[error("No ongoing preservation from #{source_channel} to #{destination}")]
    NotRegistered {
        source_channel: String,
        destination: String,
    },

    #[error("You need the Manage Messages permission in #{channel} to do that")]
    MissingPermission { channel: String },

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Errors raised by the reaction role mirror.
#[derive(Debug, Error)]
pub enum RoleMirrorError {
    #[error("Emoji '{emoji}' is not mapped to a role")]
    UnmappedEmoji { emoji: String },

    #[error("Role '{name}' does not exist in the guild")]
    UnknownRole { name: String },

    #[error("Guild {guild_id} not present in cache")]
    GuildNotCached { guild_id: u64 },

    #[error("Reaction outside a guild")]
    NotInGuild,

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}
