//! Blueprint query commands.
//!
//! `blueprint` fuzzy-searches ids and display names; `xml` posts the
//! source markup for an exact match, rate-limited per user.

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::debug;

use crate::discord::bot::BotState;
use crate::discord::commands::{blueprint_usage, query_too_short, xml_usage};
use crate::search::lookup::PositionedMatch;

/// Number of matches shown per list.
const SEARCH_LIMIT: usize = 5;

/// Handle `blueprint <query>`.
pub async fn handle_blueprint(
    ctx: &Context,
    msg: &Message,
    state: &BotState,
    query: &str,
) -> anyhow::Result<()> {
    if query_too_short(query) {
        msg.channel_id
            .say(&ctx.http, blueprint_usage(&state.prefix))
            .await?;
        return Ok(());
    }

    let results = state.lookup.search(query, SEARCH_LIMIT).await;

    let embed = CreateEmbed::new()
        .description("Matches:")
        .field(
            "Blueprint names (and display name):",
            field_lines(state, &results.id_matches, |id, name| {
                format!("`{}` ('{}')", id, name)
            }),
            true,
        )
        .field(
            "Display names (and blueprint name):",
            field_lines(state, &results.name_matches, |id, name| {
                format!("'{}' (`{}`)", name, id)
            }),
            true,
        );

    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;
    Ok(())
}

/// Handle `xml <query>`, subject to the per-user cooldown.
pub async fn handle_xml(
    ctx: &Context,
    msg: &Message,
    state: &BotState,
    query: &str,
) -> anyhow::Result<()> {
    if query_too_short(query) {
        msg.channel_id.say(&ctx.http, xml_usage(&state.prefix)).await?;
        return Ok(());
    }

    let cooldown = state.xml_cooldown.lock().await.check(msg.author.id);
    if let Err(remaining) = cooldown {
        msg.channel_id
            .say(
                &ctx.http,
                format!(
                    "Please wait another {:.0} seconds before using this command again.",
                    remaining.as_secs_f64().ceil()
                ),
            )
            .await?;
        return Ok(());
    }

    match state.lookup.find_exact(query) {
        Some(record) => {
            let reply = format!("```xml\n{}\n```", record.source);
            msg.channel_id.say(&ctx.http, reply).await?;
        }
        None => {
            debug!("xml: no exact match for '{}', running fuzzy fallback", query);
            let nearest = state.lookup.find_closest(query).await;

            // A failed lookup should not consume the cooldown token.
            state.xml_cooldown.lock().await.reset(msg.author.id);

            let reply = match nearest {
                Some(nearest) => format!(
                    "Sorry, nothing matching that name was found. \
                     The closest blueprint name is `{}`.",
                    nearest.value
                ),
                None => "Sorry, nothing matching that name was found.".to_string(),
            };
            msg.channel_id.say(&ctx.http, reply).await?;
        }
    }

    Ok(())
}

/// Render one embed field's lines, resolving each match back to its
/// record for the paired id/display-name text.
fn field_lines(
    state: &BotState,
    matches: &[PositionedMatch],
    render: impl Fn(&str, &str) -> String,
) -> String {
    let lines: Vec<String> = matches
        .iter()
        .filter_map(|m| state.lookup.index().get(m.position))
        .map(|record| render(&record.id, &record.displayname))
        .collect();

    if lines.is_empty() {
        "(none)".to_string()
    } else {
        lines.join("\n")
    }
}
