//! Session state types.

use serde::{Deserialize, Serialize};

use crate::message::{Message, Part};

/// The lifecycle status of one conversation view.
///
/// `Ready` and `Error` are terminal: no further chunks are expected without
/// a new user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    /// Idle, or the last turn completed successfully.
    Ready,
    /// A request was sent; no response bytes received yet.
    Submitted,
    /// First response bytes received; chunks are being applied.
    Streaming,
    /// The last turn failed. Terminal until the user retries.
    Error,
}

impl ChatStatus {
    /// Returns true while a turn is in flight (`Submitted` or `Streaming`).
    pub fn is_in_flight(&self) -> bool {
        matches!(self, ChatStatus::Submitted | ChatStatus::Streaming)
    }
}

/// The uncommitted input of a session: draft text plus pending attachments.
///
/// Owned exclusively by the UI until submission, at which point it is
/// cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// The text the user has typed but not yet sent.
    pub text: String,
    /// Attachments staged for the next submission (file parts).
    pub attachments: Vec<Part>,
}

impl Draft {
    /// True when there is nothing submittable: whitespace-only text and no
    /// attachments.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.attachments.is_empty()
    }

    /// Clears text and attachments.
    pub fn clear(&mut self) {
        self.text.clear();
        self.attachments.clear();
    }
}

/// The payload handed to the transport when a turn is submitted.
///
/// Agent and model are the session's selection captured at submission time;
/// they stay frozen for the duration of the turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSubmission {
    /// Full conversation history including the just-committed user message.
    pub messages: Vec<Message>,
    /// Selected agent name.
    pub agent: String,
    /// Selected client-facing model label.
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_empty_on_whitespace() {
        let draft = Draft {
            text: "   \n\t".to_string(),
            attachments: Vec::new(),
        };
        assert!(draft.is_empty());
    }

    #[test]
    fn test_draft_with_attachment_is_submittable() {
        let draft = Draft {
            text: String::new(),
            attachments: vec![Part::File {
                media_type: "image/png".to_string(),
                filename: None,
                url: "blob:1".to_string(),
            }],
        };
        assert!(!draft.is_empty());
    }

    #[test]
    fn test_status_in_flight() {
        assert!(ChatStatus::Submitted.is_in_flight());
        assert!(ChatStatus::Streaming.is_in_flight());
        assert!(!ChatStatus::Ready.is_in_flight());
        assert!(!ChatStatus::Error.is_in_flight());
    }
}
