//! Conversation state machine.

use tracing::{debug, warn};

use super::model::{ChatStatus, ChatSubmission, Draft};
use crate::message::{Message, MessageRole, Part};
use crate::slash_command::{parse_draft, CommandParse, SessionCommand};
use crate::stream::StreamEvent;

/// Client-side state of one conversation.
///
/// `ChatSession` tracks the draft input, the committed message history, and
/// the status state machine for the in-flight turn. Streamed chunks are
/// applied one at a time in receipt order; there are no concurrent writers
/// to a session's message list.
pub struct ChatSession {
    messages: Vec<Message>,
    status: ChatStatus,
    draft: Draft,
    selected_agent: String,
    selected_model: String,
    /// Message text of the error surfaced by the last failed turn.
    last_error: Option<String>,
}

impl ChatSession {
    /// Creates a session with the given default agent and model selection.
    pub fn new(default_agent: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            status: ChatStatus::Ready,
            draft: Draft::default(),
            selected_agent: default_agent.into(),
            selected_model: default_model.into(),
            last_error: None,
        }
    }

    /// Current session status.
    pub fn status(&self) -> ChatStatus {
        self.status
    }

    /// Committed conversation history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The uncommitted draft.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Currently selected agent name.
    pub fn selected_agent(&self) -> &str {
        &self.selected_agent
    }

    /// Currently selected model label.
    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    /// Error message of the last failed turn, if the session is in `Error`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces the draft text.
    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    /// Stages a file attachment for the next submission.
    pub fn add_attachment(
        &mut self,
        media_type: impl Into<String>,
        filename: Option<String>,
        url: impl Into<String>,
    ) {
        self.draft.attachments.push(Part::File {
            media_type: media_type.into(),
            filename,
            url: url.into(),
        });
    }

    /// Changes the selected agent.
    ///
    /// Selection is frozen while a turn is in flight; returns false and
    /// leaves the selection unchanged in that case.
    pub fn select_agent(&mut self, agent: impl Into<String>) -> bool {
        if self.status.is_in_flight() {
            warn!("agent selection ignored: turn in flight");
            return false;
        }
        self.selected_agent = agent.into();
        true
    }

    /// Changes the selected model label. Frozen while a turn is in flight.
    pub fn select_model(&mut self, model: impl Into<String>) -> bool {
        if self.status.is_in_flight() {
            warn!("model selection ignored: turn in flight");
            return false;
        }
        self.selected_model = model.into();
        true
    }

    /// Submits the current draft as a new user turn.
    ///
    /// Returns the payload for the transport, or `None` when the submission
    /// is a no-op: empty/whitespace-only draft with no attachments, a draft
    /// that starts with the command prefix (routed through the command
    /// interpreter instead, kept as draft text until applied or edited), or
    /// a turn already in flight. On success the draft is cleared, the user
    /// message is committed atomically, and the session enters `Submitted`.
    pub fn submit(&mut self) -> Option<ChatSubmission> {
        if self.status.is_in_flight() {
            warn!("submit ignored: turn already in flight");
            return None;
        }
        if self.draft.is_empty() {
            return None;
        }
        if parse_draft(&self.draft.text) != CommandParse::NotACommand {
            debug!("submit ignored: draft is a command");
            return None;
        }

        let text = std::mem::take(&mut self.draft.text);
        let attachments = std::mem::take(&mut self.draft.attachments);
        self.messages
            .push(Message::user(text.trim().to_string(), attachments));

        self.begin_turn()
    }

    /// Re-issues the prior user message as a new submission.
    ///
    /// Permitted only when the session is `Ready` or `Error` and the last
    /// message is from the assistant. The errored or completed assistant
    /// turn is retained; a fresh assistant message is appended once chunks
    /// arrive, so history shows both attempts.
    pub fn regenerate(&mut self) -> Option<ChatSubmission> {
        if self.status.is_in_flight() {
            return None;
        }
        if !matches!(
            self.messages.last().map(|m| m.role),
            Some(MessageRole::Assistant)
        ) {
            return None;
        }
        if !self
            .messages
            .iter()
            .any(|m| m.role == MessageRole::User)
        {
            return None;
        }

        self.begin_turn()
    }

    fn begin_turn(&mut self) -> Option<ChatSubmission> {
        self.status = ChatStatus::Submitted;
        self.last_error = None;
        debug!(
            agent = %self.selected_agent,
            model = %self.selected_model,
            "turn submitted"
        );
        Some(ChatSubmission {
            messages: self.messages.clone(),
            agent: self.selected_agent.clone(),
            model: self.selected_model.clone(),
        })
    }

    /// Applies one streamed event to the session.
    ///
    /// Events are applied strictly in arrival order. After a stop or a
    /// terminal signal the session is no longer in flight and any late
    /// chunk is ignored, so a stop strictly prevents further mutation.
    pub fn apply_event(&mut self, event: StreamEvent) {
        if !self.status.is_in_flight() {
            debug!("stream event ignored: session not in flight");
            return;
        }

        match event {
            StreamEvent::Finish => {
                self.status = ChatStatus::Ready;
                return;
            }
            StreamEvent::Error { message } => {
                warn!(error = %message, "stream failed");
                self.last_error = Some(message);
                self.status = ChatStatus::Error;
                return;
            }
            _ => {}
        }

        // First content chunk: enter Streaming and open the assistant message.
        if self.status == ChatStatus::Submitted {
            self.status = ChatStatus::Streaming;
            self.messages.push(Message::assistant());
        }

        let Some(assistant) = self
            .messages
            .last_mut()
            .filter(|m| m.role == MessageRole::Assistant)
        else {
            warn!("stream event dropped: no open assistant message");
            return;
        };

        match event {
            StreamEvent::TextDelta { index, delta } => {
                if index < assistant.parts.len() {
                    if !assistant.parts[index].append_text(&delta) {
                        warn!(index, "text delta for non-appendable part ignored");
                    }
                } else {
                    assistant.parts.push(Part::text(delta));
                }
            }
            StreamEvent::ReasoningDelta { index, delta } => {
                if index < assistant.parts.len() {
                    if !assistant.parts[index].append_text(&delta) {
                        warn!(index, "reasoning delta for non-appendable part ignored");
                    }
                } else {
                    assistant.parts.push(Part::reasoning(delta));
                }
            }
            StreamEvent::ToolInvocation {
                index,
                tool_name,
                state,
            } => {
                let part = Part::ToolInvocation { tool_name, state };
                if index < assistant.parts.len() {
                    // Only an already-announced tool call may be updated in
                    // place; other part kinds are never overwritten.
                    if matches!(assistant.parts[index], Part::ToolInvocation { .. }) {
                        assistant.parts[index] = part;
                    } else {
                        warn!(index, "tool invocation for non-tool part ignored");
                    }
                } else {
                    assistant.parts.push(part);
                }
            }
            StreamEvent::File {
                index,
                media_type,
                filename,
                url,
            } => {
                let part = Part::File {
                    media_type,
                    filename,
                    url,
                };
                if index < assistant.parts.len() {
                    // File parts are immutable once attached.
                    warn!(index, "duplicate file event ignored");
                } else {
                    assistant.parts.push(part);
                }
            }
            // Terminal events were handled above.
            StreamEvent::Finish | StreamEvent::Error { .. } => {}
        }
    }

    /// User-initiated stop.
    ///
    /// Halts further chunk application without discarding already-received
    /// parts and returns true when the transport should be told to cancel.
    /// Idempotent: calling stop while already `Ready` is a no-op.
    pub fn stop(&mut self) -> bool {
        if self.status.is_in_flight() {
            self.status = ChatStatus::Ready;
            true
        } else {
            false
        }
    }

    /// Clears the conversation history. Rejected while a turn is in flight.
    pub fn clear_conversation(&mut self) -> bool {
        if self.status.is_in_flight() {
            return false;
        }
        self.messages.clear();
        self.last_error = None;
        true
    }

    /// Applies a parsed slash command to the session and clears the draft.
    ///
    /// Returns false when the command could not be applied (e.g. a turn is
    /// in flight); the draft is left untouched in that case.
    pub fn apply_command(&mut self, command: SessionCommand) -> bool {
        let applied = match command {
            SessionCommand::SwitchAgent { agent } => self.select_agent(agent),
            SessionCommand::SwitchModel { model } => self.select_model(model),
            SessionCommand::ClearConversation => self.clear_conversation(),
            // Help is rendered by the UI from the builtin table; nothing to
            // mutate here.
            SessionCommand::ShowHelp => true,
        };
        if applied {
            self.draft.clear();
        }
        applied
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
