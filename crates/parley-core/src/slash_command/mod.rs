//! Slash command interpretation.
//!
//! A draft that begins with `/` is treated as a potential command instead of
//! a submittable message. The parser matches it against a small builtin
//! vocabulary (switch agent, switch model, clear conversation, help) and
//! performs no side effects itself; the session applies the matched command
//! and clears the draft. An unmatched draft stays literal text, sendable
//! again once the leading `/` is removed.

mod builtin;
mod model;
mod parser;

pub use builtin::{builtin_commands, find_builtin_command, BuiltinSlashCommand};
pub use model::SessionCommand;
pub use parser::{parse_draft, CommandParse, COMMAND_PREFIX};
