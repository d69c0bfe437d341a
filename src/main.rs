//! Archivist - Discord bot for the Caves of Qud community
//!
//! Fuzzy-searches the game's blueprint index, preserves messages into
//! archive channels and mirrors reaction-menu emoji onto roles.

mod common;
mod config;
mod discord;
mod index;
mod preserve;
mod search;

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{error, info};

use config::env::get_config_path;
use discord::BotState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Archivist v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = config::load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Command prefix: {}", config.prefix());
    info!("  Index file: {}", config.index.path);
    info!(
        "  Role menus: {}",
        if config.roles.is_some() { "configured" } else { "disabled" }
    );

    // Load the blueprint index (read-only for the process lifetime)
    let blueprint_index = Arc::new(index::load_index(&config.index.path).map_err(|e| {
        error!("Failed to load blueprint index: {}", e);
        e
    })?);

    let state = Arc::new(BotState::new(&config, blueprint_index));
    let mut client = discord::build_client(&config, state).await?;

    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                error!("Discord client error: {:?}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received - disconnecting...");
            shard_manager.shutdown_all().await;
        }
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
