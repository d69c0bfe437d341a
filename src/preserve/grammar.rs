//! Preserve command grammar.
//!
//! Three accepted forms:
//!
//! ```text
//! what
//! <message-locator> in <destination-channel>
//! [future|no more] pins from <source-channel> in <destination-channel>
//! ```
//!
//! A small hand-written parser instead of regex dispatch, so every
//! malformed shape falls out of an exhaustive match.

use crate::common::error::PreserveError;

/// Temporal modifier on the pins form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalModifier {
    /// Watch for future pins in the source channel.
    Future,
    /// Stop watching a previously registered pair.
    NoMore,
}

/// Parsed preserve command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreserveCommand {
    /// Repost a single message into the destination channel.
    Message {
        source: String,
        destination: String,
    },
    /// Repost pinned messages from the source channel, or manage the
    /// future-pins registry when a modifier is present.
    Pins {
        modifier: Option<TemporalModifier>,
        source: String,
        destination: String,
    },
    /// List the registered future-pin pairs.
    What,
}

/// Parse the free-form argument text after `preserve`.
pub fn parse_preserve(arg: &str) -> Result<PreserveCommand, PreserveError> {
    let arg = arg.trim();

    if arg == "what" {
        return Ok(PreserveCommand::What);
    }

    // Split on the first " in "; the left side is the source specifier.
    let (source_spec, destination) = arg
        .split_once(" in ")
        .ok_or_else(|| PreserveError::Syntax(arg.to_string()))?;
    let source_spec = source_spec.trim();
    let destination = destination.trim();

    if source_spec.is_empty() || destination.is_empty() {
        return Err(PreserveError::Syntax(arg.to_string()));
    }

    let (modifier, rest) = if let Some(rest) = source_spec.strip_prefix("future ") {
        (Some(TemporalModifier::Future), rest)
    } else if let Some(rest) = source_spec.strip_prefix("no more ") {
        (Some(TemporalModifier::NoMore), rest)
    } else {
        (None, source_spec)
    };

    if rest == "pins from" {
        return Err(PreserveError::Syntax(arg.to_string()));
    }
    if let Some(source) = rest.strip_prefix("pins from ") {
        let source = source.trim();
        if source.is_empty() {
            return Err(PreserveError::Syntax(arg.to_string()));
        }
        return Ok(PreserveCommand::Pins {
            modifier,
            source: source.to_string(),
            destination: destination.to_string(),
        });
    }

    // A modifier without the pins form is not a message locator.
    if modifier.is_some() {
        return Err(PreserveError::Syntax(arg.to_string()));
    }

    Ok(PreserveCommand::Message {
        source: source_spec.to_string(),
        destination: destination.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_what() {
        assert_eq!(parse_preserve("what").unwrap(), PreserveCommand::What);
        assert_eq!(parse_preserve("  what  ").unwrap(), PreserveCommand::What);
    }

    #[test]
    fn test_parse_message_form() {
        let cmd = parse_preserve(
            "https://discord.com/channels/1/2/3 in #archive",
        )
        .unwrap();
        assert_eq!(
            cmd,
            PreserveCommand::Message {
                source: "https://discord.com/channels/1/2/3".to_string(),
                destination: "#archive".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_pins_one_shot() {
        let cmd = parse_preserve("pins from #general in #archive").unwrap();
        assert_eq!(
            cmd,
            PreserveCommand::Pins {
                modifier: None,
                source: "#general".to_string(),
                destination: "#archive".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_pins_future() {
        let cmd = parse_preserve("future pins from #general in #archive").unwrap();
        assert_eq!(
            cmd,
            PreserveCommand::Pins {
                modifier: Some(TemporalModifier::Future),
                source: "#general".to_string(),
                destination: "#archive".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_pins_no_more() {
        let cmd = parse_preserve("no more pins from #general in #archive").unwrap();
        assert_eq!(
            cmd,
            PreserveCommand::Pins {
                modifier: Some(TemporalModifier::NoMore),
                source: "#general".to_string(),
                destination: "#archive".to_string(),
            }
        );
    }

    #[test]
    fn test_splits_on_first_in() {
        // The first " in " wins, even when later text contains the word.
        let cmd = parse_preserve("pins from #news in #archive in disguise");
        assert!(matches!(
            cmd,
            Ok(PreserveCommand::Pins { destination, .. }) if destination == "#archive in disguise"
        ));
    }

    #[test]
    fn test_missing_in_is_syntax_error() {
        assert!(matches!(
            parse_preserve("pins from #general"),
            Err(PreserveError::Syntax(_))
        ));
    }

    #[test]
    fn test_modifier_without_pins_is_syntax_error() {
        assert!(matches!(
            parse_preserve("future something in #archive"),
            Err(PreserveError::Syntax(_))
        ));
    }

    #[test]
    fn test_empty_parts_are_syntax_errors() {
        assert!(parse_preserve(" in #archive").is_err());
        assert!(parse_preserve("pins from  in #archive").is_err());
        assert!(parse_preserve("").is_err());
    }
}
