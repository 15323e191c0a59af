//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation:
//! roles, the part-based content model, and append helpers used while an
//! assistant response is streaming in.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// The lifecycle state of a tool invocation surfaced to the UI.
///
/// Only the name and state of a tool call cross this boundary; raw tool
/// arguments never reach the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolInvocationState {
    /// The runtime has announced the call but no result yet.
    Running,
    /// The tool produced a result that was fed back to the model.
    Completed,
    /// The tool call failed; the model continues without its output.
    Failed,
}

/// One typed fragment of a message's content.
///
/// This is a closed set: rendering and accumulation sites match exhaustively,
/// so adding a part kind requires updating every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    /// Plain response text, appendable while streaming.
    Text { text: String },
    /// Model reasoning text, appendable while streaming.
    Reasoning { text: String },
    /// Placeholder for a tool call; carries name and state only.
    ToolInvocation {
        tool_name: String,
        state: ToolInvocationState,
    },
    /// A retrievable file attachment. Immutable once attached.
    File {
        media_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        url: String,
    },
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Creates a reasoning part.
    pub fn reasoning(text: impl Into<String>) -> Self {
        Part::Reasoning { text: text.into() }
    }

    /// Returns the textual payload for text and reasoning parts.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } | Part::Reasoning { text } => Some(text),
            _ => None,
        }
    }

    /// Appends a delta to an appendable part.
    ///
    /// Returns false when the part kind does not accept incremental text
    /// (tool invocations and files are not appendable).
    pub fn append_text(&mut self, delta: &str) -> bool {
        match self {
            Part::Text { text } | Part::Reasoning { text } => {
                text.push_str(delta);
                true
            }
            _ => false,
        }
    }
}

/// A single message in a conversation history.
///
/// A user message's parts are finalized atomically on submission. An
/// assistant message's parts grow monotonically while its stream is open and
/// become immutable once the stream reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier, assigned at creation.
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// Ordered content fragments. Order is significant and append-only once
    /// assistant output begins.
    pub parts: Vec<Part>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub created_at: String,
}

impl Message {
    /// Creates a message with the given role and parts.
    pub fn new(role: MessageRole, parts: Vec<Part>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            parts,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user message from submitted text and attachment parts.
    ///
    /// An attachment-only submission carries no empty text part.
    pub fn user(text: impl Into<String>, attachments: Vec<Part>) -> Self {
        let text = text.into();
        let mut parts = Vec::new();
        if !text.is_empty() {
            parts.push(Part::text(text));
        }
        parts.extend(attachments);
        Self::new(MessageRole::User, parts)
    }

    /// Creates an empty assistant message ready to receive streamed parts.
    pub fn assistant() -> Self {
        Self::new(MessageRole::Assistant, Vec::new())
    }

    /// Concatenated text of all text parts, used for regeneration.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_parts() {
        let file = Part::File {
            media_type: "image/png".to_string(),
            filename: Some("photo.png".to_string()),
            url: "blob:photo".to_string(),
        };
        let msg = Message::user("hello", vec![file]);

        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.parts.len(), 2);
        assert_eq!(msg.parts[0].as_text(), Some("hello"));
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn test_append_text_only_on_appendable_parts() {
        let mut text = Part::text("A");
        assert!(text.append_text("B"));
        assert_eq!(text.as_text(), Some("AB"));

        let mut tool = Part::ToolInvocation {
            tool_name: "get-weather".to_string(),
            state: ToolInvocationState::Running,
        };
        assert!(!tool.append_text("B"));
    }

    #[test]
    fn test_text_content_skips_non_text_parts() {
        let mut msg = Message::assistant();
        msg.parts.push(Part::text("first"));
        msg.parts.push(Part::reasoning("thinking"));
        msg.parts.push(Part::text("second"));

        assert_eq!(msg.text_content(), "first\nsecond");
    }

    #[test]
    fn test_part_serialization_tags() {
        let part = Part::File {
            media_type: "application/pdf".to_string(),
            filename: None,
            url: "https://example.com/doc.pdf".to_string(),
        };
        let json = serde_json::to_value(&part).unwrap();

        assert_eq!(json["type"], "file");
        assert_eq!(json["media_type"], "application/pdf");
        assert!(json.get("filename").is_none());
    }
}
