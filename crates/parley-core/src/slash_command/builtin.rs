//! Builtin slash commands provided by the chat interface.
//!
//! These commands are always available and cannot be modified by users.
//! They are loaded once at startup and cached for the lifetime of the
//! application.

use serde::Serialize;
use std::sync::OnceLock;

/// A builtin slash command provided by the system.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltinSlashCommand {
    /// Command name (without the leading /)
    pub name: &'static str,
    /// Usage format (e.g., "/agent <name>")
    pub usage: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Optional description of expected arguments
    pub args: Option<&'static str>,
}

impl BuiltinSlashCommand {
    /// Creates a new builtin slash command.
    pub const fn new(
        name: &'static str,
        usage: &'static str,
        description: &'static str,
        args: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            usage,
            description,
            args,
        }
    }
}

/// Static storage for builtin commands (initialized once).
static BUILTIN_COMMANDS: OnceLock<Vec<BuiltinSlashCommand>> = OnceLock::new();

/// Returns a reference to all builtin slash commands.
///
/// The commands are initialized on first access and cached for subsequent
/// calls.
pub fn builtin_commands() -> &'static [BuiltinSlashCommand] {
    BUILTIN_COMMANDS.get_or_init(|| {
        vec![
            BuiltinSlashCommand::new(
                "agent",
                "/agent <name>",
                "Switch which agent handles the next turns",
                Some("Registered agent name, e.g. travelPlanningAgent"),
            ),
            BuiltinSlashCommand::new(
                "model",
                "/model <label>",
                "Switch the model used for the next turns",
                Some("Model label, e.g. gpt-4o-mini"),
            ),
            BuiltinSlashCommand::new(
                "clear",
                "/clear",
                "Clear the conversation history",
                None,
            ),
            BuiltinSlashCommand::new(
                "help",
                "/help",
                "Show available commands and their usage",
                None,
            ),
        ]
    })
}

/// Finds a builtin command by name (without the leading /).
pub fn find_builtin_command(name: &str) -> Option<&'static BuiltinSlashCommand> {
    builtin_commands().iter().find(|cmd| cmd.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_commands_available() {
        let commands = builtin_commands();
        assert!(commands.iter().any(|c| c.name == "agent"));
        assert!(commands.iter().any(|c| c.name == "clear"));
    }

    #[test]
    fn test_find_builtin_command() {
        assert!(find_builtin_command("model").is_some());
        assert!(find_builtin_command("deploy").is_none());
    }
}
