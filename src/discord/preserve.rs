//! The `preserve` command.
//!
//! Reposts a linked message, or a channel's pinned messages, as embeds
//! into a destination channel. The invoking user must hold Manage
//! Messages in the destination channel; the guard runs before any side
//! effect.

use std::sync::OnceLock;

use fancy_regex::Regex;
use serenity::builder::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage};
use serenity::model::channel::{GuildChannel, Message};
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use serenity::model::permissions::Permissions;
use serenity::model::Timestamp;
use serenity::prelude::*;
use tracing::info;

use crate::common::error::PreserveError;
use crate::discord::bot::BotState;
use crate::preserve::{parse_preserve, PreserveCommand, TemporalModifier};

/// Embed colour for preserved messages.
const EMBED_COLOUR: u32 = 0x000F_403F;

/// Message link: https://discord.com/channels/<guild>/<channel>/<message>
fn message_link_regex() -> &'static Regex {
    static MESSAGE_LINK: OnceLock<Regex> = OnceLock::new();
    MESSAGE_LINK.get_or_init(|| {
        Regex::new(r"^https?://(?:\w+\.)?discord(?:app)?\.com/channels/\d+/(\d+)/(\d+)$").unwrap()
    })
}

/// Entry point from the dispatcher. User-addressable failures (syntax,
/// unknown channel, missing permission, unregistered pair) are reported
/// in-channel; Discord API failures propagate to the generic error path.
pub async fn handle_preserve(
    ctx: &Context,
    msg: &Message,
    guild_id: GuildId,
    state: &BotState,
    arg: &str,
) -> anyhow::Result<()> {
    match execute(ctx, msg, guild_id, state, arg).await {
        Ok(()) => Ok(()),
        Err(PreserveError::Discord(e)) => Err(e.into()),
        Err(user_error) => {
            msg.channel_id.say(&ctx.http, user_error.to_string()).await?;
            Ok(())
        }
    }
}

async fn execute(
    ctx: &Context,
    msg: &Message,
    guild_id: GuildId,
    state: &BotState,
    arg: &str,
) -> Result<(), PreserveError> {
    let command = parse_preserve(arg)?;

    match command {
        PreserveCommand::What => {
            let snapshot = state.preservations.read().await.snapshot();
            let reply = if snapshot.is_empty() {
                "No channels are being watched for future pins.".to_string()
            } else {
                snapshot
                    .iter()
                    .map(|(source, destination)| format!("#{} -> #{}", source, destination))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            msg.channel_id.say(&ctx.http, reply).await?;
        }

        PreserveCommand::Message {
            source,
            destination,
        } => {
            let destination = resolve_channel(ctx, guild_id, &destination)?;
            authorize(ctx, guild_id, msg.author.id, &destination).await?;

            let original = resolve_message(ctx, msg.channel_id, &source).await?;
            preserve_message(ctx, &original, &destination).await?;
            info!(
                "Preserved message {} into #{}",
                original.id, destination.name
            );
        }

        PreserveCommand::Pins {
            modifier,
            source,
            destination,
        } => {
            let destination = resolve_channel(ctx, guild_id, &destination)?;
            authorize(ctx, guild_id, msg.author.id, &destination).await?;
            let source = resolve_channel(ctx, guild_id, &source)?;

            match modifier {
                None => {
                    let mut pins = source.id.pins(&ctx.http).await?;
                    sort_oldest_first(&mut pins, |pin| pin.timestamp);
                    let count = pins.len();
                    for pin in &pins {
                        preserve_message(ctx, pin, &destination).await?;
                    }
                    info!(
                        "Preserved {} pins from #{} into #{}",
                        count, source.name, destination.name
                    );
                }
                Some(TemporalModifier::Future) => {
                    state
                        .preservations
                        .write()
                        .await
                        .add(&source.name, &destination.name);
                    msg.channel_id
                        .say(
                            &ctx.http,
                            format!(
                                "Watching #{} for future pins, reposting to #{}.",
                                source.name, destination.name
                            ),
                        )
                        .await?;
                }
                Some(TemporalModifier::NoMore) => {
                    state
                        .preservations
                        .write()
                        .await
                        .remove(&source.name, &destination.name)?;
                    msg.channel_id
                        .say(
                            &ctx.http,
                            format!("No longer watching #{} for pins.", source.name),
                        )
                        .await?;
                }
            }
        }
    }

    Ok(())
}

/// The pin list arrives newest-first from the API; repost earliest
/// first, keeping full timestamp precision so same-second pins stay in
/// order.
fn sort_oldest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> Timestamp) {
    items.sort_by(|a, b| created_at(a).cmp(&created_at(b)));
}

/// Require Manage Messages for the user in the destination channel.
async fn authorize(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
    destination: &GuildChannel,
) -> Result<(), PreserveError> {
    let member = guild_id.member(&ctx.http, user_id).await?;

    let permissions = {
        let guild = ctx
            .cache
            .guild(guild_id)
            .ok_or_else(|| PreserveError::UnknownChannel(destination.name.clone()))?;
        guild.user_permissions_in(destination, &member)
    };

    if !permissions.contains(Permissions::MANAGE_MESSAGES) {
        return Err(PreserveError::MissingPermission {
            channel: destination.name.clone(),
        });
    }
    Ok(())
}

/// Resolve a channel specifier: `<#id>` mention, raw id, or (#-prefixed)
/// name, against the guild's cached channel list.
fn resolve_channel(
    ctx: &Context,
    guild_id: GuildId,
    spec: &str,
) -> Result<GuildChannel, PreserveError> {
    let spec = spec.trim();

    let channel = {
        let guild = ctx
            .cache
            .guild(guild_id)
            .ok_or_else(|| PreserveError::UnknownChannel(spec.to_string()))?;

        match parse_channel_id(spec) {
            Some(id) => guild.channels.get(&id).cloned(),
            None => {
                let name = spec.trim_start_matches('#');
                guild
                    .channels
                    .values()
                    .find(|channel| channel.name == name)
                    .cloned()
            }
        }
    };

    channel.ok_or_else(|| PreserveError::UnknownChannel(spec.to_string()))
}

/// Resolve a message specifier: a full message link, or a raw message id
/// in the invoking channel.
async fn resolve_message(
    ctx: &Context,
    invoking_channel: ChannelId,
    spec: &str,
) -> Result<Message, PreserveError> {
    let spec = spec.trim();

    let (channel_id, message_id) = parse_message_locator(spec, invoking_channel)
        .ok_or_else(|| PreserveError::UnknownMessage(spec.to_string()))?;

    ctx.http
        .get_message(channel_id, message_id)
        .await
        .map_err(|_| PreserveError::UnknownMessage(spec.to_string()))
}

/// Parse `<#id>` mentions and bare ids.
fn parse_channel_id(spec: &str) -> Option<ChannelId> {
    let digits = spec
        .strip_prefix("<#")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(spec);

    match digits.parse::<u64>() {
        Ok(id) if id != 0 => Some(ChannelId::new(id)),
        _ => None,
    }
}

/// Extract (channel, message) ids from a message link or a bare id.
fn parse_message_locator(spec: &str, invoking_channel: ChannelId) -> Option<(ChannelId, MessageId)> {
    if let Ok(Some(captures)) = message_link_regex().captures(spec) {
        let channel: u64 = captures.get(1)?.as_str().parse().ok()?;
        let message: u64 = captures.get(2)?.as_str().parse().ok()?;
        if channel != 0 && message != 0 {
            return Some((ChannelId::new(channel), MessageId::new(message)));
        }
        return None;
    }

    match spec.parse::<u64>() {
        Ok(id) if id != 0 => Some((invoking_channel, MessageId::new(id))),
        _ => None,
    }
}

/// Repost `message` into `destination` as an embed.
async fn preserve_message(
    ctx: &Context,
    message: &Message,
    destination: &GuildChannel,
) -> Result<(), PreserveError> {
    let source_channel = message
        .guild_id
        .and_then(|guild_id| {
            let guild = ctx.cache.guild(guild_id)?;
            guild
                .channels
                .get(&message.channel_id)
                .map(|channel| channel.name.clone())
        })
        .unwrap_or_default();

    let embed = build_preserved_embed(message, &source_channel);
    destination
        .id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;
    Ok(())
}

/// Format a preserved message: author identity, timestamp, content,
/// attachment count with a link back to the original message, the source
/// channel in the footer, and the first image attachment (only the
/// first, even when more exist).
fn build_preserved_embed(message: &Message, source_channel: &str) -> CreateEmbed {
    let display_name = message
        .author
        .global_name
        .as_deref()
        .unwrap_or(&message.author.name);
    let author_line = format!("{}, aka {}", message.author.tag(), display_name);

    let mut embed = CreateEmbed::new()
        .colour(EMBED_COLOUR)
        .description(message.content.clone())
        .timestamp(message.timestamp)
        .author(CreateEmbedAuthor::new(author_line).icon_url(message.author.face()))
        .field(
            "__              __",
            format!(
                "{}[(original)]({})",
                attachment_summary(message.attachments.len()),
                message.link()
            ),
            false,
        )
        .footer(CreateEmbedFooter::new(format!("in #{}", source_channel)));

    if let Some(image) = message
        .attachments
        .iter()
        .find(|attachment| attachment.width.is_some() && attachment.height.is_some())
    {
        embed = embed.image(image.url.clone());
    }

    embed
}

/// "1 attachment " / "3 attachments ", empty when there are none.
fn attachment_summary(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 attachment ".to_string(),
        n => format!("{} attachments ", n),
    }
}
