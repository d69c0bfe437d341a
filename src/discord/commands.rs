//! Command parsing.
//!
//! Inbound messages are parsed into a tagged [`Command`] which the event
//! handler matches on — a dispatch table in enum form rather than
//! framework reflection.

/// A parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fuzzy search over blueprint ids and display names.
    Blueprint { query: String },
    /// Post the source XML for an exact blueprint match.
    Xml { query: String },
    /// Message preservation; the argument text is parsed by
    /// [`crate::preserve::parse_preserve`].
    Preserve { arg: String },
    /// Show the command summary.
    Help,
}

/// Parse message content into a command.
///
/// Returns None for content without the prefix or with an unknown command
/// name; those messages are ignored entirely.
pub fn parse_command(prefix: &str, content: &str) -> Option<Command> {
    let rest = content.strip_prefix(prefix)?;
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name.to_lowercase().as_str() {
        "blueprint" => Some(Command::Blueprint {
            query: collapse_whitespace(args),
        }),
        "xml" => Some(Command::Xml {
            query: collapse_whitespace(args),
        }),
        "preserve" => Some(Command::Preserve {
            arg: args.to_string(),
        }),
        "help" => Some(Command::Help),
        _ => None,
    }
}

/// True if a query is too short to search: under two characters after
/// trimming, which covers empty and whitespace-only input.
pub fn query_too_short(query: &str) -> bool {
    query.trim().chars().count() < 2
}

pub fn blueprint_usage(prefix: &str) -> String {
    format!(
        "Usage: `{}blueprint <query>` — search blueprint names and display names \
         with at least two characters.",
        prefix
    )
}

pub fn xml_usage(prefix: &str) -> String {
    format!(
        "Usage: `{}xml <query>` — post the source XML for a blueprint \
         (exact name, at least two characters).",
        prefix
    )
}

pub fn help_text(prefix: &str) -> String {
    format!(
        "**Available Commands:**\n\
         • `{p}blueprint <query>` - Fuzzy-search blueprint names and display names\n\
         • `{p}xml <query>` - Post the source XML for a blueprint (1 use per 10s)\n\
         • `{p}preserve <message link> in <channel>` - Repost a message as an embed\n\
         • `{p}preserve [future|no more] pins from <channel> in <channel>` - Repost pinned messages\n\
         \u{2003}\u{2003}`future` - **NOT FULLY IMPLEMENTED** watch the channel for new pins\n\
         \u{2003}\u{2003}`no more` - cancel a previous `future`\n\
         • `{p}preserve what` - List channels watched for future pins\n\
         • `{p}help` - Show this help message",
        p = prefix
    )
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blueprint() {
        let cmd = parse_command("?", "?blueprint snapjaw scavenger").unwrap();
        assert_eq!(
            cmd,
            Command::Blueprint {
                query: "snapjaw scavenger".to_string()
            }
        );
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let cmd = parse_command("?", "?xml   chrome   pyramid ").unwrap();
        assert_eq!(
            cmd,
            Command::Xml {
                query: "chrome pyramid".to_string()
            }
        );
    }

    #[test]
    fn test_parse_preserve_keeps_raw_argument() {
        let cmd = parse_command("?", "?preserve pins from #general in #archive").unwrap();
        assert_eq!(
            cmd,
            Command::Preserve {
                arg: "pins from #general in #archive".to_string()
            }
        );
    }

    #[test]
    fn test_parse_bare_command() {
        assert_eq!(parse_command("?", "?help").unwrap(), Command::Help);
        assert_eq!(
            parse_command("?", "?blueprint").unwrap(),
            Command::Blueprint {
                query: String::new()
            }
        );
    }

    #[test]
    fn test_command_name_case_insensitive() {
        assert_eq!(parse_command("?", "?HELP").unwrap(), Command::Help);
    }

    #[test]
    fn test_non_prefixed_and_unknown_ignored() {
        assert!(parse_command("?", "hello there").is_none());
        assert!(parse_command("?", "?unknowncommand").is_none());
        assert!(parse_command("!", "?help").is_none());
    }

    #[test]
    fn test_query_too_short() {
        assert!(query_too_short(""));
        assert!(query_too_short(" "));
        assert!(query_too_short("\t \n"));
        assert!(query_too_short("a"));
        assert!(!query_too_short("ab"));
        assert!(!query_too_short("snapjaw"));
    }
}
