//! Discord event handling.
//!
//! Routes message events through the command dispatch table and mirrors
//! reaction events onto role grants.

use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::{Message, Reaction};
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use tracing::{error, info};

use crate::discord::bot::BotState;
use crate::discord::commands::{self, Command};
use crate::discord::roles::{self, MirrorAction};
use crate::discord::{blueprints, preserve};

/// Discord event handler.
pub struct ArchivistHandler;

#[async_trait]
impl EventHandler for ArchivistHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore our own messages
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        // Ignore bots
        if msg.author.bot {
            return;
        }

        // Only handle guild (server) messages
        let Some(guild_id) = msg.guild_id else {
            return;
        };

        let content = msg.content.trim();
        let Some(state) = shared_state(&ctx).await else {
            return;
        };
        let Some(command) = commands::parse_command(&state.prefix, content) else {
            return;
        };

        let channel_name = ctx.cache.guild(guild_id).and_then(|guild| {
            guild
                .channels
                .get(&msg.channel_id)
                .map(|channel| channel.name.clone())
        });
        info!(
            "({}) <{}> {}",
            channel_label(channel_name, msg.channel_id),
            msg.author.name,
            content
        );

        let result = match command {
            Command::Blueprint { query } => {
                blueprints::handle_blueprint(&ctx, &msg, &state, &query).await
            }
            Command::Xml { query } => blueprints::handle_xml(&ctx, &msg, &state, &query).await,
            Command::Preserve { arg } => {
                preserve::handle_preserve(&ctx, &msg, guild_id, &state, &arg).await
            }
            Command::Help => msg
                .channel_id
                .say(&ctx.http, commands::help_text(&state.prefix))
                .await
                .map(|_| ())
                .map_err(Into::into),
        };

        if let Err(e) = result {
            error!("Command handler error: {}", e);
            let _ = msg
                .channel_id
                .say(&ctx.http, "Something went wrong processing that command.")
                .await;
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        if let Some(state) = shared_state(&ctx).await {
            roles::handle_reaction(&ctx, &state, &reaction, MirrorAction::Add).await;
        }
    }

    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        if let Some(state) = shared_state(&ctx).await {
            roles::handle_reaction(&ctx, &state, &reaction, MirrorAction::Remove).await;
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Discord bot connected as {}", ready.user.name);
    }
}

/// Fetch the shared bot state from the TypeMap.
async fn shared_state(ctx: &Context) -> Option<Arc<BotState>> {
    let data = ctx.data.read().await;
    data.get::<BotState>().cloned()
}

/// Channel name when cached, the raw id otherwise.
fn channel_label(name: Option<String>, channel_id: ChannelId) -> String {
    name.unwrap_or_else(|| channel_id.to_string())
}
