//! Slash command domain models.

use serde::{Deserialize, Serialize};

/// A session mutation selected through the command interpreter.
///
/// Applying a command never performs a network call; it only mutates the
/// local session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Switch the selected agent for subsequent turns.
    SwitchAgent { agent: String },
    /// Switch the selected model label for subsequent turns.
    SwitchModel { model: String },
    /// Clear the conversation history.
    ClearConversation,
    /// Show the builtin command reference.
    ShowHelp,
}
