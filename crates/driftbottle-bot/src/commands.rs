//! Command matching against user text.
//!
//! Two commands, both configurable:
//!
//! - throw: text starting with the throw prefix; the remainder is the
//!   bottle content. A bare prefix with nothing after it does not match.
//! - pick: text exactly equal to the pick command.
//!
//! The matcher only routes; content validation (e.g. whitespace-only
//! content) belongs to the lifecycle service.

use crate::config::CommandConfig;

/// A recognized user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Throw a bottle with the given (trimmed) content.
    Throw(String),
    /// Pick a random bottle.
    Pick,
}

/// Matches incoming message text against the configured command patterns.
#[derive(Debug, Clone)]
pub struct CommandMatcher {
    throw_prefix: String,
    pick_command: String,
}

impl CommandMatcher {
    /// Creates a matcher from the command configuration.
    pub fn new(config: &CommandConfig) -> Self {
        Self {
            throw_prefix: config.throw_prefix.clone(),
            pick_command: config.pick_command.clone(),
        }
    }

    /// Parses message text into a command, or `None` when it matches
    /// neither pattern.
    pub fn parse(&self, text: &str) -> Option<Command> {
        let text = text.trim_start();
        if text.trim_end() == self.pick_command {
            return Some(Command::Pick);
        }
        match text.strip_prefix(self.throw_prefix.as_str()) {
            // Bare prefix: not a command, stay silent. Whitespace after the
            // prefix does match; the service rejects the empty content.
            Some("") | None => None,
            Some(rest) => Some(Command::Throw(rest.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> CommandMatcher {
        CommandMatcher::new(&CommandConfig::default())
    }

    #[test]
    fn test_pick_exact_match() {
        assert_eq!(matcher().parse("捡漂流瓶"), Some(Command::Pick));
        assert_eq!(matcher().parse("  捡漂流瓶  "), Some(Command::Pick));
    }

    #[test]
    fn test_pick_with_trailing_text_is_not_pick() {
        assert_eq!(matcher().parse("捡漂流瓶吧"), None);
    }

    #[test]
    fn test_throw_extracts_content() {
        assert_eq!(
            matcher().parse("扔漂流瓶Hello sea"),
            Some(Command::Throw("Hello sea".to_string()))
        );
        assert_eq!(
            matcher().parse("扔漂流瓶  带空格的内容  "),
            Some(Command::Throw("带空格的内容".to_string()))
        );
    }

    #[test]
    fn test_bare_throw_prefix_does_not_match() {
        assert_eq!(matcher().parse("扔漂流瓶"), None);
    }

    #[test]
    fn test_whitespace_only_content_matches_as_empty_throw() {
        // The service rejects it; the matcher just routes.
        assert_eq!(
            matcher().parse("扔漂流瓶   "),
            Some(Command::Throw(String::new()))
        );
    }

    #[test]
    fn test_unrelated_text_matches_nothing() {
        assert_eq!(matcher().parse("hello"), None);
        assert_eq!(matcher().parse(""), None);
    }

    #[test]
    fn test_custom_patterns() {
        let matcher = CommandMatcher::new(&CommandConfig {
            throw_prefix: "/throw ".to_string(),
            pick_command: "/pick".to_string(),
        });
        assert_eq!(
            matcher.parse("/throw message in a bottle"),
            Some(Command::Throw("message in a bottle".to_string()))
        );
        assert_eq!(matcher.parse("/pick"), Some(Command::Pick));
    }
}
