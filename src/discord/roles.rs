//! Reaction role mirror.
//!
//! Watches reaction add/remove events on the two configured menu
//! messages and grants or revokes the role mapped to the emoji.
//! Reactions on any other message are ignored entirely.

use std::collections::HashMap;

use serenity::model::channel::{Reaction, ReactionType};
use serenity::model::id::UserId;
use serenity::prelude::*;
use tracing::{error, info};

use crate::common::error::RoleMirrorError;
use crate::config::RolesConfig;
use crate::discord::bot::BotState;

/// Whether a reaction event grants or revokes the mapped role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAction {
    Add,
    Remove,
}

impl MirrorAction {
    fn verb(self) -> &'static str {
        match self {
            MirrorAction::Add => "added",
            MirrorAction::Remove => "removed",
        }
    }
}

/// Handle a reaction event end to end.
///
/// Failures (unmapped emoji on a menu message, missing role, cache miss)
/// are logged through the generic error path rather than surfaced to the
/// reacting user.
pub async fn handle_reaction(
    ctx: &Context,
    state: &BotState,
    reaction: &Reaction,
    action: MirrorAction,
) {
    let Some(roles) = state.roles.as_ref() else {
        return;
    };
    let Some(user_id) = reaction.user_id else {
        return;
    };

    if state.ignored_users.contains(&user_id) || user_id == ctx.cache.current_user().id {
        return;
    }

    // Reactions anywhere but the configured menu messages are a no-op.
    let Some(menu) = select_menu(roles, reaction.message_id.get()) else {
        return;
    };

    match mirror(ctx, reaction, user_id, menu, action).await {
        Ok(role_name) => {
            info!(
                "({}) <{}> {} role {}",
                reaction.channel_id,
                user_id,
                action.verb(),
                role_name
            );
        }
        Err(e) => error!("Role mirror error: {}", e),
    }
}

/// Pick the emoji->role mapping for a menu message id, if any.
fn select_menu(roles: &RolesConfig, message_id: u64) -> Option<&HashMap<String, String>> {
    if message_id == roles.role_message_id {
        Some(&roles.role_menu)
    } else if message_id == roles.entry_message_id {
        Some(&roles.entry_menu)
    } else {
        None
    }
}

/// The config key for a reaction emoji: the literal character for
/// unicode emoji, the bare name for custom guild emoji.
fn emoji_key(emoji: &ReactionType) -> String {
    match emoji {
        ReactionType::Unicode(value) => value.clone(),
        ReactionType::Custom { name, .. } => name.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

async fn mirror(
    ctx: &Context,
    reaction: &Reaction,
    user_id: UserId,
    menu: &HashMap<String, String>,
    action: MirrorAction,
) -> Result<String, RoleMirrorError> {
    let guild_id = reaction.guild_id.ok_or(RoleMirrorError::NotInGuild)?;

    let key = emoji_key(&reaction.emoji);
    let role_name = menu
        .get(&key)
        .ok_or(RoleMirrorError::UnmappedEmoji { emoji: key })?;

    let role_id = {
        let guild = ctx
            .cache
            .guild(guild_id)
            .ok_or(RoleMirrorError::GuildNotCached {
                guild_id: guild_id.get(),
            })?;
        guild.role_by_name(role_name).map(|role| role.id)
    }
    .ok_or_else(|| RoleMirrorError::UnknownRole {
        name: role_name.clone(),
    })?;

    match action {
        MirrorAction::Add => {
            ctx.http
                .add_member_role(guild_id, user_id, role_id, Some("role menu reaction"))
                .await?;
        }
        MirrorAction::Remove => {
            ctx.http
                .remove_member_role(guild_id, user_id, role_id, Some("role menu reaction"))
                .await?;
        }
    }

    Ok(role_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_roles_config() -> RolesConfig {
        let mut role_menu = HashMap::new();
        role_menu.insert("🐟".to_string(), "Fisher".to_string());
        let mut entry_menu = HashMap::new();
        entry_menu.insert("✅".to_string(), "Citizen".to_string());

        RolesConfig {
            role_message_id: 111,
            entry_message_id: 222,
            role_menu,
            entry_menu,
        }
    }

    #[test]
    fn test_select_menu_role_message() {
        let roles = make_roles_config();
        let menu = select_menu(&roles, 111).unwrap();
        assert_eq!(menu.get("🐟").unwrap(), "Fisher");
    }

    #[test]
    fn test_select_menu_entry_message() {
        let roles = make_roles_config();
        let menu = select_menu(&roles, 222).unwrap();
        assert_eq!(menu.get("✅").unwrap(), "Citizen");
    }

    #[test]
    fn test_select_menu_unrecognized_message_is_none() {
        let roles = make_roles_config();
        assert!(select_menu(&roles, 999).is_none());
    }

    #[test]
    fn test_emoji_key_unicode() {
        let emoji = ReactionType::Unicode("🐟".to_string());
        assert_eq!(emoji_key(&emoji), "🐟");
    }
}
