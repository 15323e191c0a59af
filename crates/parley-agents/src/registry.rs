//! Fixed agent registry.
//!
//! The registry maps agent names to their resolved configuration:
//! instructions (literal or remotely managed), default model identifier and
//! tool set. Instructions are resolved exactly once at initialization;
//! lookups afterwards are read-only and never perform I/O.

use std::collections::HashMap;
use std::env;
use tracing::{info, warn};

use parley_core::error::{ParleyError, Result};

use crate::prompt::{PromptMetadata, PromptResolver, ResolveOptions};
use crate::tools::{find_tool, ToolDescriptor};

const WEATHER_INSTRUCTIONS: &str = "\
You are a versatile AI assistant with multimodal capabilities.

- Use the weather tool to provide accurate forecasts and conditions for any location
- Describe, analyze, and answer questions about images when provided
- Combine different types of information naturally in your responses
- Be conversational and friendly, and ask clarifying questions if needed";

const FINANCIAL_INSTRUCTIONS: &str = "\
You are an expert financial analyst specializing in corporate earnings \
reports and financial statements.

- Extract key financial figures accurately (revenue, operating profit, net income)
- Calculate important ratios and growth rates, and identify notable changes
- Highlight both positive and negative aspects objectively
- Structure your analysis: executive summary, financial performance, key \
insights, risks and opportunities, recommendation";

const CODE_REVIEW_INSTRUCTIONS: &str = "\
You are an expert software engineer specializing in code review, quality \
analysis, and security assessment.

- Evaluate code structure, readability, and maintainability
- Identify security vulnerabilities and rate them CRITICAL/HIGH/MEDIUM/LOW
- Point out performance bottlenecks and missing test coverage
- Be constructive and specific, with code examples for suggested improvements";

const TRAVEL_INSTRUCTIONS: &str = "\
You are an expert travel planner creating personalized travel experiences.

- Use the travel tool for destination information: attractions, best season, \
budget, local tips
- Create day-by-day itineraries with realistic time allocations
- Balance popular attractions with local experiences
- Be enthusiastic, informative, and realistic about costs and distances";

const MANAGED_FALLBACK_INSTRUCTIONS: &str = "\
You are a helpful AI assistant whose instructions are normally managed in a \
remote prompt store. The store is currently unreachable or not configured, \
so you are running in fallback mode as a basic conversational assistant.";

/// Default prompt name for the remotely managed agent.
const DEFAULT_MANAGED_PROMPT_NAME: &str = "parley.langfuse.agent.system";
/// Default deployment label for the remotely managed agent.
const DEFAULT_MANAGED_PROMPT_LABEL: &str = "production";

/// Where an agent's instructions come from.
#[derive(Debug, Clone, Copy)]
enum InstructionSource {
    /// A fixed literal instruction string.
    Literal(&'static str),
    /// Resolved from the remote prompt store, with a local fallback.
    Managed { fallback: &'static str },
}

/// Static definition of one agent, before prompt resolution.
struct AgentDefinition {
    name: &'static str,
    display_name: &'static str,
    default_model: &'static str,
    instructions: InstructionSource,
    tools: &'static [&'static str],
}

const AGENT_DEFINITIONS: &[AgentDefinition] = &[
    AgentDefinition {
        name: "weatherAgent",
        display_name: "General Assistant",
        default_model: "openai/gpt-4o",
        instructions: InstructionSource::Literal(WEATHER_INSTRUCTIONS),
        tools: &["get-weather"],
    },
    AgentDefinition {
        name: "financialAnalystAgent",
        display_name: "Financial Analyst",
        default_model: "openai/gpt-4o",
        instructions: InstructionSource::Literal(FINANCIAL_INSTRUCTIONS),
        tools: &[],
    },
    AgentDefinition {
        name: "codeReviewAgent",
        display_name: "Code Reviewer",
        default_model: "openai/gpt-4o",
        instructions: InstructionSource::Literal(CODE_REVIEW_INSTRUCTIONS),
        tools: &[],
    },
    AgentDefinition {
        name: "travelPlanningAgent",
        display_name: "Travel Planner",
        default_model: "openai/gpt-4o-mini",
        instructions: InstructionSource::Literal(TRAVEL_INSTRUCTIONS),
        tools: &["get-travel-info"],
    },
    AgentDefinition {
        name: "langfuseManagedAgent",
        display_name: "Managed Agent",
        default_model: "openai/gpt-4o-mini",
        instructions: InstructionSource::Managed {
            fallback: MANAGED_FALLBACK_INSTRUCTIONS,
        },
        tools: &["get-timezone"],
    },
];

/// Settings for the remotely managed prompt, sourced from the environment.
#[derive(Debug, Clone)]
pub struct ManagedPromptSettings {
    /// Prompt name in the remote store.
    pub prompt_name: String,
    /// Deployment label to fetch.
    pub prompt_label: String,
    /// Template variables injected into the prompt.
    pub variables: HashMap<String, String>,
}

impl ManagedPromptSettings {
    /// Loads settings from environment variables, falling back to defaults.
    ///
    /// - `LANGFUSE_AGENT_PROMPT_NAME` (default `parley.langfuse.agent.system`)
    /// - `LANGFUSE_AGENT_PROMPT_LABEL` (default `production`)
    /// - `LANGFUSE_PROMPT_VAR_TONE` (default `professional`)
    /// - `LANGFUSE_PROMPT_VAR_CHANNEL` (default `web`)
    pub fn from_env() -> Self {
        let prompt_name = env::var("LANGFUSE_AGENT_PROMPT_NAME")
            .unwrap_or_else(|_| DEFAULT_MANAGED_PROMPT_NAME.to_string());
        let prompt_label = env::var("LANGFUSE_AGENT_PROMPT_LABEL")
            .unwrap_or_else(|_| DEFAULT_MANAGED_PROMPT_LABEL.to_string());
        let mut variables = HashMap::new();
        variables.insert(
            "tone".to_string(),
            env::var("LANGFUSE_PROMPT_VAR_TONE").unwrap_or_else(|_| "professional".to_string()),
        );
        variables.insert(
            "channel".to_string(),
            env::var("LANGFUSE_PROMPT_VAR_CHANNEL").unwrap_or_else(|_| "web".to_string()),
        );
        Self {
            prompt_name,
            prompt_label,
            variables,
        }
    }
}

impl Default for ManagedPromptSettings {
    fn default() -> Self {
        Self {
            prompt_name: DEFAULT_MANAGED_PROMPT_NAME.to_string(),
            prompt_label: DEFAULT_MANAGED_PROMPT_LABEL.to_string(),
            variables: HashMap::new(),
        }
    }
}

/// The resolved configuration of one agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Registry key.
    pub name: String,
    /// Human-readable name shown in the UI.
    pub display_name: String,
    /// The instruction string actually given to the agent.
    pub instructions: String,
    /// Statically configured default model identifier.
    pub default_model: String,
    /// Model override sourced from the remote prompt's config, if any.
    pub prompt_model_id: Option<String>,
    /// Tools this agent may invoke.
    pub tools: Vec<&'static ToolDescriptor>,
    /// Resolution metadata for the managed prompt (observability only).
    pub prompt_metadata: Option<PromptMetadata>,
}

/// A fixed table of agents keyed by name.
///
/// Lookup by unknown name is an error at this boundary; upstream callers
/// may substitute a default name before lookup (router policy).
pub struct AgentRegistry {
    agents: HashMap<String, AgentConfig>,
}

impl AgentRegistry {
    /// Builds the registry, resolving managed instructions through the
    /// given resolver exactly once.
    pub async fn initialize(resolver: &PromptResolver, settings: &ManagedPromptSettings) -> Self {
        let mut agents = HashMap::new();

        for definition in AGENT_DEFINITIONS {
            let tools = definition
                .tools
                .iter()
                .filter_map(|name| {
                    let tool = find_tool(name);
                    if tool.is_none() {
                        warn!(tool = name, agent = definition.name, "unknown tool skipped");
                    }
                    tool
                })
                .collect();

            let (instructions, prompt_model_id, prompt_metadata) = match definition.instructions {
                InstructionSource::Literal(text) => (text.to_string(), None, None),
                InstructionSource::Managed { fallback } => {
                    let resolved = resolver
                        .resolve(
                            &settings.prompt_name,
                            &ResolveOptions {
                                label: Some(settings.prompt_label.clone()),
                                version: None,
                                variables: settings.variables.clone(),
                                fallback_text: fallback.to_string(),
                            },
                        )
                        .await;
                    info!(
                        agent = definition.name,
                        source = ?resolved.metadata.source,
                        version = ?resolved.metadata.prompt_version,
                        "managed instructions loaded"
                    );
                    (
                        resolved.text,
                        resolved.model_id,
                        Some(resolved.metadata),
                    )
                }
            };

            agents.insert(
                definition.name.to_string(),
                AgentConfig {
                    name: definition.name.to_string(),
                    display_name: definition.display_name.to_string(),
                    instructions,
                    default_model: definition.default_model.to_string(),
                    prompt_model_id,
                    tools,
                    prompt_metadata,
                },
            );
        }

        Self { agents }
    }

    /// Looks up an agent by name. Unknown names are an error here, not a
    /// silent default.
    pub fn get(&self, name: &str) -> Result<&AgentConfig> {
        self.agents
            .get(name)
            .ok_or_else(|| ParleyError::not_found("agent", name))
    }

    /// True when the registry contains the named agent.
    pub fn contains(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    /// Names of all registered agents.
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{PromptSource, PromptStore, StoredPrompt};
    use async_trait::async_trait;
    use serde_json::json;

    async fn fallback_registry() -> AgentRegistry {
        AgentRegistry::initialize(
            &PromptResolver::without_store(),
            &ManagedPromptSettings::default(),
        )
        .await
    }

    #[tokio::test]
    async fn test_all_agents_registered() {
        let registry = fallback_registry().await;
        for name in [
            "weatherAgent",
            "financialAnalystAgent",
            "codeReviewAgent",
            "travelPlanningAgent",
            "langfuseManagedAgent",
        ] {
            assert!(registry.contains(name), "missing agent {name}");
        }
    }

    #[tokio::test]
    async fn test_unknown_agent_is_error() {
        let registry = fallback_registry().await;
        let err = registry.get("doesNotExist").unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_agent_tools_wired() {
        let registry = fallback_registry().await;
        let weather = registry.get("weatherAgent").unwrap();
        assert_eq!(weather.tools.len(), 1);
        assert_eq!(weather.tools[0].name, "get-weather");

        let reviewer = registry.get("codeReviewAgent").unwrap();
        assert!(reviewer.tools.is_empty());
    }

    #[tokio::test]
    async fn test_managed_agent_falls_back_without_store() {
        let registry = fallback_registry().await;
        let managed = registry.get("langfuseManagedAgent").unwrap();

        assert_eq!(managed.instructions, MANAGED_FALLBACK_INSTRUCTIONS);
        assert!(managed.prompt_model_id.is_none());
        let metadata = managed.prompt_metadata.as_ref().unwrap();
        assert_eq!(metadata.source, PromptSource::Fallback);
    }

    #[tokio::test]
    async fn test_managed_agent_uses_remote_prompt_and_model() {
        struct StubStore;

        #[async_trait]
        impl PromptStore for StubStore {
            async fn get_prompt(
                &self,
                name: &str,
                _selector: &crate::prompt::PromptSelector,
            ) -> parley_core::error::Result<StoredPrompt> {
                assert_eq!(name, "parley.langfuse.agent.system");
                Ok(StoredPrompt {
                    prompt: json!("Managed {{tone}} agent."),
                    version: Some(2),
                    config: Some(json!({ "modelId": "openai/gpt-4o" })),
                })
            }
        }

        let mut settings = ManagedPromptSettings::default();
        settings
            .variables
            .insert("tone".to_string(), "curt".to_string());
        let registry =
            AgentRegistry::initialize(&PromptResolver::new(Box::new(StubStore)), &settings).await;

        let managed = registry.get("langfuseManagedAgent").unwrap();
        assert_eq!(managed.instructions, "Managed curt agent.");
        assert_eq!(managed.prompt_model_id, Some("openai/gpt-4o".to_string()));
        let metadata = managed.prompt_metadata.as_ref().unwrap();
        assert_eq!(metadata.source, PromptSource::Remote);
        assert_eq!(metadata.prompt_version, Some(2));
    }

    #[tokio::test]
    async fn test_store_404_still_initializes_agent() {
        struct NotFoundStore;

        #[async_trait]
        impl PromptStore for NotFoundStore {
            async fn get_prompt(
                &self,
                _name: &str,
                _selector: &crate::prompt::PromptSelector,
            ) -> parley_core::error::Result<StoredPrompt> {
                Err(parley_core::ParleyError::remote(
                    "prompt store returned 404 Not Found",
                ))
            }
        }

        let registry = AgentRegistry::initialize(
            &PromptResolver::new(Box::new(NotFoundStore)),
            &ManagedPromptSettings::default(),
        )
        .await;

        let managed = registry.get("langfuseManagedAgent").unwrap();
        assert_eq!(managed.instructions, MANAGED_FALLBACK_INSTRUCTIONS);
        let metadata = managed.prompt_metadata.as_ref().unwrap();
        assert_eq!(metadata.source, PromptSource::Fallback);
        assert!(metadata.error.as_deref().unwrap().contains("404"));
    }
}
