//! Side-effect-free draft parser for slash commands.

use super::builtin::find_builtin_command;
use super::model::SessionCommand;

/// The character that turns a draft into a potential command.
pub const COMMAND_PREFIX: char = '/';

/// The outcome of interpreting a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParse {
    /// The draft does not start with the command prefix; it is an ordinary
    /// message.
    NotACommand,
    /// The draft starts with the prefix but matches no builtin command, or
    /// required arguments are missing. The draft is kept as literal text and
    /// is not submittable while the prefix remains.
    Unmatched,
    /// A recognized command ready to be applied to the session.
    Matched(SessionCommand),
}

/// Parses a draft against the builtin command vocabulary.
///
/// This performs no side effects; callers apply the matched command to the
/// session themselves.
pub fn parse_draft(draft: &str) -> CommandParse {
    let trimmed = draft.trim();
    let Some(rest) = trimmed.strip_prefix(COMMAND_PREFIX) else {
        return CommandParse::NotACommand;
    };

    let mut tokens = rest.split_whitespace();
    let Some(name) = tokens.next() else {
        // A lone "/" is not a command yet.
        return CommandParse::Unmatched;
    };
    if find_builtin_command(name).is_none() {
        return CommandParse::Unmatched;
    }

    let arg = tokens.next();
    match (name, arg) {
        ("agent", Some(agent)) => CommandParse::Matched(SessionCommand::SwitchAgent {
            agent: agent.to_string(),
        }),
        ("model", Some(model)) => CommandParse::Matched(SessionCommand::SwitchModel {
            model: model.to_string(),
        }),
        ("clear", None) => CommandParse::Matched(SessionCommand::ClearConversation),
        ("help", None) => CommandParse::Matched(SessionCommand::ShowHelp),
        // Known command with a malformed argument list.
        _ => CommandParse::Unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse_draft("hello there"), CommandParse::NotACommand);
        assert_eq!(parse_draft(""), CommandParse::NotACommand);
        // Prefix elsewhere in the text does not trigger the interpreter.
        assert_eq!(parse_draft("a / b"), CommandParse::NotACommand);
    }

    #[test]
    fn test_switch_agent() {
        assert_eq!(
            parse_draft("/agent travelPlanningAgent"),
            CommandParse::Matched(SessionCommand::SwitchAgent {
                agent: "travelPlanningAgent".to_string()
            })
        );
    }

    #[test]
    fn test_switch_model() {
        assert_eq!(
            parse_draft("/model gpt-4o"),
            CommandParse::Matched(SessionCommand::SwitchModel {
                model: "gpt-4o".to_string()
            })
        );
    }

    #[test]
    fn test_clear_and_help() {
        assert_eq!(
            parse_draft("/clear"),
            CommandParse::Matched(SessionCommand::ClearConversation)
        );
        assert_eq!(
            parse_draft("  /help  "),
            CommandParse::Matched(SessionCommand::ShowHelp)
        );
    }

    #[test]
    fn test_unknown_command_stays_literal() {
        assert_eq!(parse_draft("/deploy prod"), CommandParse::Unmatched);
        assert_eq!(parse_draft("/"), CommandParse::Unmatched);
    }

    #[test]
    fn test_missing_argument_is_unmatched() {
        assert_eq!(parse_draft("/agent"), CommandParse::Unmatched);
        assert_eq!(parse_draft("/model"), CommandParse::Unmatched);
        // Trailing garbage after a no-arg command.
        assert_eq!(parse_draft("/clear now"), CommandParse::Unmatched);
    }
}
