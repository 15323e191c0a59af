//! The request boundary for the chat endpoint.
//!
//! Transport framing (HTTP routing, SSE encoding) is owned by the host web
//! framework; this module turns a raw request body into everything the
//! external agent runtime needs to stream a response, and maps failures to
//! the single hard error surface the endpoint exposes.

use serde::{Deserialize, Serialize};
use tracing::error;

use parley_core::message::Message;

use crate::registry::AgentRegistry;
use crate::router::{route, ChatRequest};

/// HTTP status reported for request-path failures.
pub const ERROR_STATUS: u16 = 500;

/// JSON error body returned for malformed bodies or routing failures.
///
/// This is the only error class that reaches the caller as a hard failure;
/// everything else is absorbed internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable discriminant.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorBody {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal_server_error".to_string(),
            message: message.into(),
        }
    }
}

/// Everything the external agent runtime needs to execute one turn.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedChat {
    /// Name of the agent handling the turn.
    pub agent: String,
    /// The agent's resolved instruction string.
    pub instructions: String,
    /// Backend model identifier for this turn.
    pub model_id: String,
    /// Names of the tools the agent may invoke.
    pub tools: Vec<&'static str>,
    /// Conversation history passed through unchanged.
    pub messages: Vec<Message>,
}

/// Parses and routes a raw chat request body.
///
/// On success the returned [`PreparedChat`] is handed to the agent runtime,
/// which streams the response back to the session. On failure the
/// [`ErrorBody`] is serialized with status [`ERROR_STATUS`].
pub fn prepare_chat(registry: &AgentRegistry, body: &str) -> Result<PreparedChat, ErrorBody> {
    let request: ChatRequest = serde_json::from_str(body).map_err(|err| {
        error!(error = %err, "malformed chat request body");
        ErrorBody::internal(format!("malformed request body: {err}"))
    })?;

    let decision = route(registry, &request).map_err(|err| {
        error!(error = %err, "chat request routing failed");
        ErrorBody::internal(err.to_string())
    })?;

    Ok(PreparedChat {
        agent: decision.agent.name.clone(),
        instructions: decision.agent.instructions.clone(),
        model_id: decision.effective_model_id,
        tools: decision.agent.tools.iter().map(|tool| tool.name).collect(),
        messages: request.messages,
    })
}
