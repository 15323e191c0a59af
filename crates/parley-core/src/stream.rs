//! Stream event wire contract.
//!
//! The transport delivers an assistant response as an ordered sequence of
//! part-indexed events terminated by a completion or error signal. Exact
//! framing (SSE, WebSocket, ...) is owned by the transport; this module only
//! fixes the event vocabulary that maps onto [`crate::message::Part`].

use serde::{Deserialize, Serialize};

use crate::message::ToolInvocationState;

/// One incremental event of an assistant response stream.
///
/// Events carrying an `index` address a part slot within the assistant
/// message under construction: an unseen index creates a new part, a known
/// index appends to (or updates) the existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    /// Incremental response text for the part at `index`.
    TextDelta { index: usize, delta: String },
    /// Incremental reasoning text for the part at `index`.
    ReasoningDelta { index: usize, delta: String },
    /// A tool call placeholder or a state update for one already announced.
    ToolInvocation {
        index: usize,
        tool_name: String,
        state: ToolInvocationState,
    },
    /// A file attachment produced by the agent. Immutable once emitted.
    File {
        index: usize,
        media_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        url: String,
    },
    /// Terminal signal: the response completed normally.
    Finish,
    /// Terminal signal: the stream failed mid-flight.
    Error { message: String },
}

impl StreamEvent {
    /// Returns true for the terminal `finish`/`error` signals.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Finish | StreamEvent::Error { .. })
    }

    /// Returns the part index addressed by this event, if any.
    pub fn part_index(&self) -> Option<usize> {
        match self {
            StreamEvent::TextDelta { index, .. }
            | StreamEvent::ReasoningDelta { index, .. }
            | StreamEvent::ToolInvocation { index, .. }
            | StreamEvent::File { index, .. } => Some(*index),
            StreamEvent::Finish | StreamEvent::Error { .. } => None,
        }
    }
}
