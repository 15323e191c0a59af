//! Request routing: agent and model selection.
//!
//! The router is a pure selection function over (messages presence, agent,
//! model); it never inspects message content and performs no I/O, since all
//! remote work happened during registry initialization.

use serde::{Deserialize, Serialize};
use tracing::warn;

use parley_core::error::{ParleyError, Result};
use parley_core::message::Message;

use crate::registry::{AgentConfig, AgentRegistry};

/// Agent substituted when a request names no (or an unknown) agent.
///
/// This is a deliberate UX fallback at the router boundary, distinct from
/// the registry's strict lookup.
pub const DEFAULT_AGENT: &str = "weatherAgent";

/// Backend identifier substituted for unrecognized model labels.
pub const DEFAULT_MODEL_ID: &str = "openai/gpt-4o-mini";

/// Allow-list of client-facing model labels and their backend identifiers.
const MODEL_LABELS: &[(&str, &str)] = &[
    ("gpt-4o-mini", "openai/gpt-4o-mini"),
    ("gpt-4o", "openai/gpt-4o"),
    ("gpt-3.5-turbo", "openai/gpt-3.5-turbo"),
];

/// Maps a client-facing model label to its backend identifier.
pub fn backend_model_id(label: &str) -> Option<&'static str> {
    MODEL_LABELS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, id)| *id)
}

/// An inbound chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation history, most recent user message last.
    pub messages: Vec<Message>,
    /// Requested agent name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Requested client-facing model label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// The outcome of routing one request.
#[derive(Debug, Clone)]
pub struct RouteDecision<'a> {
    /// The agent configuration that will handle the request.
    pub agent: &'a AgentConfig,
    /// The backend model identifier to use for this turn.
    pub effective_model_id: String,
}

/// Selects the agent and effective model for a request.
///
/// Agent policy: a missing or unregistered agent name substitutes
/// [`DEFAULT_AGENT`] with a logged warning. Model precedence: an explicit
/// request label (mapped through the allow-list, unrecognized labels fall
/// back to [`DEFAULT_MODEL_ID`]) beats the agent's resolved-prompt model,
/// which beats the agent's static default.
///
/// # Errors
///
/// Returns `InvalidRequest` when the request carries no messages. A missing
/// default agent is an internal error.
pub fn route<'a>(registry: &'a AgentRegistry, request: &ChatRequest) -> Result<RouteDecision<'a>> {
    if request.messages.is_empty() {
        return Err(ParleyError::invalid_request(
            "request must contain at least one message",
        ));
    }

    let agent_name = match &request.agent {
        Some(name) if registry.contains(name) => name.as_str(),
        Some(name) => {
            warn!(
                requested = %name,
                default = DEFAULT_AGENT,
                "unknown agent requested, substituting default"
            );
            DEFAULT_AGENT
        }
        None => DEFAULT_AGENT,
    };
    let agent = registry
        .get(agent_name)
        .map_err(|_| ParleyError::internal(format!("default agent '{agent_name}' missing")))?;

    let effective_model_id = match &request.model {
        Some(label) => match backend_model_id(label) {
            Some(id) => id.to_string(),
            None => {
                warn!(
                    requested = %label,
                    default = DEFAULT_MODEL_ID,
                    "unrecognized model label, substituting default"
                );
                DEFAULT_MODEL_ID.to_string()
            }
        },
        None => agent
            .prompt_model_id
            .clone()
            .unwrap_or_else(|| agent.default_model.clone()),
    };

    Ok(RouteDecision {
        agent,
        effective_model_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptResolver;
    use crate::registry::ManagedPromptSettings;
    use parley_core::message::{Message, MessageRole, Part};

    async fn registry() -> AgentRegistry {
        AgentRegistry::initialize(
            &PromptResolver::without_store(),
            &ManagedPromptSettings::default(),
        )
        .await
    }

    fn request(agent: Option<&str>, model: Option<&str>) -> ChatRequest {
        ChatRequest {
            messages: vec![Message::new(MessageRole::User, vec![Part::text("hi")])],
            agent: agent.map(str::to_string),
            model: model.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_known_agents_route_to_their_config() {
        let registry = registry().await;
        for name in ["weatherAgent", "codeReviewAgent", "travelPlanningAgent"] {
            let decision = route(&registry, &request(Some(name), None)).unwrap();
            assert_eq!(decision.agent.name, name);
        }
    }

    #[tokio::test]
    async fn test_missing_and_unknown_agent_use_default() {
        let registry = registry().await;

        let decision = route(&registry, &request(None, None)).unwrap();
        assert_eq!(decision.agent.name, DEFAULT_AGENT);

        let decision = route(&registry, &request(Some("doesNotExist"), None)).unwrap();
        assert_eq!(decision.agent.name, DEFAULT_AGENT);
    }

    #[tokio::test]
    async fn test_model_label_mapping() {
        let registry = registry().await;

        let decision = route(&registry, &request(None, Some("gpt-4o"))).unwrap();
        assert_eq!(decision.effective_model_id, "openai/gpt-4o");

        let decision = route(&registry, &request(None, Some("gpt-3.5-turbo"))).unwrap();
        assert_eq!(decision.effective_model_id, "openai/gpt-3.5-turbo");

        // Unrecognized labels fall back to the default identifier.
        let decision = route(&registry, &request(None, Some("claude-9"))).unwrap();
        assert_eq!(decision.effective_model_id, DEFAULT_MODEL_ID);
    }

    #[tokio::test]
    async fn test_agent_default_model_without_request_label() {
        let registry = registry().await;
        let decision = route(
            &registry,
            &request(Some("travelPlanningAgent"), None),
        )
        .unwrap();
        assert_eq!(decision.effective_model_id, "openai/gpt-4o-mini");

        let decision = route(&registry, &request(Some("codeReviewAgent"), None)).unwrap();
        assert_eq!(decision.effective_model_id, "openai/gpt-4o");
    }

    #[tokio::test]
    async fn test_request_label_beats_prompt_model() {
        use crate::prompt::{PromptSelector, PromptStore, StoredPrompt};
        use async_trait::async_trait;
        use serde_json::json;

        struct StubStore;

        #[async_trait]
        impl PromptStore for StubStore {
            async fn get_prompt(
                &self,
                _name: &str,
                _selector: &PromptSelector,
            ) -> parley_core::error::Result<StoredPrompt> {
                Ok(StoredPrompt {
                    prompt: json!("managed"),
                    version: Some(1),
                    config: Some(json!({ "model": "openai/gpt-4o" })),
                })
            }
        }

        let registry = AgentRegistry::initialize(
            &PromptResolver::new(Box::new(StubStore)),
            &ManagedPromptSettings::default(),
        )
        .await;

        // Prompt-configured model applies when the request names none.
        let decision = route(
            &registry,
            &request(Some("langfuseManagedAgent"), None),
        )
        .unwrap();
        assert_eq!(decision.effective_model_id, "openai/gpt-4o");

        // An explicit request label overrides the prompt model.
        let decision = route(
            &registry,
            &request(Some("langfuseManagedAgent"), Some("gpt-3.5-turbo")),
        )
        .unwrap();
        assert_eq!(decision.effective_model_id, "openai/gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_empty_messages_rejected() {
        let registry = registry().await;
        let err = route(
            &registry,
            &ChatRequest {
                messages: Vec::new(),
                agent: None,
                model: None,
            },
        )
        .unwrap_err();
        assert!(err.is_invalid_request());
    }
}
