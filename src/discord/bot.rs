//! Discord bot setup and shared state.

use std::sync::Arc;
use std::time::Duration;

use serenity::model::id::UserId;
use serenity::prelude::*;
use tracing::info;

use crate::config::{Config, RolesConfig};
use crate::discord::cooldown::CooldownBucket;
use crate::discord::handler::ArchivistHandler;
use crate::index::BlueprintIndex;
use crate::preserve::OngoingPreservations;
use crate::search::BlueprintLookup;

/// Minimum interval between `xml` invocations per user.
pub const XML_COOLDOWN: Duration = Duration::from_secs(10);

/// Shared bot state, built once at startup and installed in serenity's
/// TypeMap. Mutable parts carry their own locks; everything else is
/// read-only for the process lifetime.
pub struct BotState {
    pub lookup: BlueprintLookup,
    pub preservations: RwLock<OngoingPreservations>,
    pub xml_cooldown: Mutex<CooldownBucket>,
    pub roles: Option<RolesConfig>,
    pub ignored_users: Vec<UserId>,
    pub prefix: String,
}

impl TypeMapKey for BotState {
    type Value = Arc<BotState>;
}

impl BotState {
    pub fn new(config: &Config, index: Arc<BlueprintIndex>) -> Self {
        Self {
            lookup: BlueprintLookup::new(index),
            preservations: RwLock::new(OngoingPreservations::new()),
            xml_cooldown: Mutex::new(CooldownBucket::new(XML_COOLDOWN)),
            roles: config.roles.clone(),
            ignored_users: config
                .ignored_users()
                .iter()
                .filter(|&&id| id != 0)
                .map(|&id| UserId::new(id))
                .collect(),
            prefix: config.prefix().to_string(),
        }
    }
}

/// Create the Discord client with the event handler and shared state.
pub async fn build_client(config: &Config, state: Arc<BotState>) -> Result<Client, serenity::Error> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_MEMBERS;

    let client = Client::builder(&config.discord.token, intents)
        .event_handler(ArchivistHandler)
        .await?;

    {
        let mut data = client.data.write().await;
        data.insert::<BotState>(state);
    }

    info!("Discord client built (prefix '{}')", config.prefix());
    Ok(client)
}
