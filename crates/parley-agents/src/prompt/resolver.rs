//! Never-failing prompt resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use super::store::{PromptSelector, PromptStore};
use super::template;

/// Where a resolved prompt's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSource {
    /// Fetched from the remote prompt store.
    Remote,
    /// The local fallback string.
    Fallback,
}

/// Why resolution fell back to the local string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Remote-store credentials are not configured; no fetch was attempted.
    MissingConfig,
    /// The fetch failed (network, timeout, not-found).
    FetchError,
}

/// Observability metadata attached to every resolution result.
///
/// Always present regardless of success. Beyond the `source` discriminant it
/// never affects control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMetadata {
    pub prompt_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_label: Option<String>,
    pub source: PromptSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FallbackReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The result of consulting the resolver for one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedPrompt {
    /// The fully variable-substituted instruction string.
    pub text: String,
    /// Optional model override sourced from the remote prompt's config.
    pub model_id: Option<String>,
    /// Observability metadata.
    pub metadata: PromptMetadata,
}

impl ResolvedPrompt {
    /// True when the text came from the remote store.
    pub fn is_remote(&self) -> bool {
        self.metadata.source == PromptSource::Remote
    }
}

/// Options for one resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Deployment label selector. Takes precedence over `version`; callers
    /// must not supply both.
    pub label: Option<String>,
    /// Explicit version selector.
    pub version: Option<u32>,
    /// Values substituted into `{{key}}` tokens.
    pub variables: HashMap<String, String>,
    /// Instruction text used when the remote store is unavailable.
    pub fallback_text: String,
}

/// Resolves agent instructions, preferring the remote store with local
/// fallback.
///
/// `resolve` never returns an error; every failure mode degrades to the
/// fallback text. Resolution happens once per agent at initialization, so
/// remote failures are absorbed there and never reach the request path.
pub struct PromptResolver {
    store: Option<Box<dyn PromptStore>>,
}

impl PromptResolver {
    /// Creates a resolver backed by the given store.
    pub fn new(store: Box<dyn PromptStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Creates a resolver with no remote store; every resolution uses the
    /// fallback text with `reason: missing_config`.
    pub fn without_store() -> Self {
        Self { store: None }
    }

    /// True when a remote store is configured.
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Resolves the named prompt.
    pub async fn resolve(&self, prompt_name: &str, options: &ResolveOptions) -> ResolvedPrompt {
        let Some(store) = &self.store else {
            warn!(
                prompt = prompt_name,
                "prompt store not configured, using fallback instructions"
            );
            return Self::fallback(prompt_name, options, FallbackReason::MissingConfig, None);
        };

        if options.label.is_some() && options.version.is_some() {
            warn!(
                prompt = prompt_name,
                "both label and version supplied, label takes precedence"
            );
        }
        let selector = PromptSelector {
            label: options.label.clone(),
            version: if options.label.is_some() {
                None
            } else {
                options.version
            },
        };

        let stored = match store.get_prompt(prompt_name, &selector).await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(
                    prompt = prompt_name,
                    error = %err,
                    "prompt fetch failed, using fallback instructions"
                );
                return Self::fallback(
                    prompt_name,
                    options,
                    FallbackReason::FetchError,
                    Some(err.to_string()),
                );
            }
        };

        let raw = stored.template_text();
        let text = match template::render(&raw, &options.variables) {
            Ok(rendered) => rendered,
            Err(err) => {
                // Partial success is preferred over total fallback once the
                // remote text was obtained: degrade to literal replacement
                // against the original template.
                warn!(
                    prompt = prompt_name,
                    error = %err,
                    "template substitution failed, applying literal replacement"
                );
                template::replace_literal(&raw, &options.variables)
            }
        };

        info!(
            prompt = prompt_name,
            version = ?stored.version,
            label = ?options.label,
            source = "remote",
            "prompt resolved"
        );

        ResolvedPrompt {
            text,
            model_id: stored.model_id(),
            metadata: PromptMetadata {
                prompt_name: prompt_name.to_string(),
                prompt_version: stored.version,
                prompt_label: options.label.clone(),
                source: PromptSource::Remote,
                reason: None,
                error: None,
            },
        }
    }

    fn fallback(
        prompt_name: &str,
        options: &ResolveOptions,
        reason: FallbackReason,
        error: Option<String>,
    ) -> ResolvedPrompt {
        ResolvedPrompt {
            text: options.fallback_text.clone(),
            model_id: None,
            metadata: PromptMetadata {
                prompt_name: prompt_name.to_string(),
                prompt_version: None,
                prompt_label: options.label.clone(),
                source: PromptSource::Fallback,
                reason: Some(reason),
                error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::store::StoredPrompt;
    use async_trait::async_trait;
    use parley_core::error::{ParleyError, Result};
    use serde_json::json;

    struct StubStore {
        prompt: std::result::Result<StoredPrompt, String>,
    }

    #[async_trait]
    impl PromptStore for StubStore {
        async fn get_prompt(
            &self,
            _name: &str,
            _selector: &PromptSelector,
        ) -> Result<StoredPrompt> {
            self.prompt.clone().map_err(ParleyError::remote)
        }
    }

    fn options(fallback: &str) -> ResolveOptions {
        ResolveOptions {
            label: Some("production".to_string()),
            version: None,
            variables: [("tone".to_string(), "friendly".to_string())]
                .into_iter()
                .collect(),
            fallback_text: fallback.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_config_returns_fallback_without_fetch() {
        let resolver = PromptResolver::without_store();
        let resolved = resolver.resolve("any.prompt", &options("local text")).await;

        assert_eq!(resolved.text, "local text");
        assert_eq!(resolved.metadata.source, PromptSource::Fallback);
        assert_eq!(resolved.metadata.reason, Some(FallbackReason::MissingConfig));
        assert!(resolved.model_id.is_none());
    }

    #[tokio::test]
    async fn test_fetch_error_returns_fallback() {
        let resolver = PromptResolver::new(Box::new(StubStore {
            prompt: Err("prompt store returned 404 Not Found".to_string()),
        }));
        let resolved = resolver.resolve("missing.prompt", &options("fb")).await;

        assert_eq!(resolved.text, "fb");
        assert_eq!(resolved.metadata.source, PromptSource::Fallback);
        assert_eq!(resolved.metadata.reason, Some(FallbackReason::FetchError));
        assert!(resolved.metadata.error.as_deref().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_remote_success_substitutes_variables() {
        let resolver = PromptResolver::new(Box::new(StubStore {
            prompt: Ok(StoredPrompt {
                prompt: json!("You are a {{tone}} assistant for {{channel}}."),
                version: Some(7),
                config: Some(json!({ "model": "openai/gpt-4o" })),
            }),
        }));
        let resolved = resolver.resolve("agent.system", &options("fb")).await;

        // Unresolved {{channel}} stays verbatim.
        assert_eq!(
            resolved.text,
            "You are a friendly assistant for {{channel}}."
        );
        assert_eq!(resolved.model_id, Some("openai/gpt-4o".to_string()));
        assert_eq!(resolved.metadata.source, PromptSource::Remote);
        assert_eq!(resolved.metadata.prompt_version, Some(7));
        assert!(resolved.is_remote());
    }

    #[tokio::test]
    async fn test_broken_template_degrades_to_literal_replacement() {
        let resolver = PromptResolver::new(Box::new(StubStore {
            prompt: Ok(StoredPrompt {
                prompt: json!("A {{tone}} assistant with a broken {{token"),
                version: None,
                config: None,
            }),
        }));
        let resolved = resolver.resolve("agent.system", &options("fb")).await;

        // Remote text is kept, literal replacement applied.
        assert_eq!(
            resolved.text,
            "A friendly assistant with a broken {{token"
        );
        assert_eq!(resolved.metadata.source, PromptSource::Remote);
    }

    #[tokio::test]
    async fn test_label_wins_over_version() {
        struct SelectorCapture;

        #[async_trait]
        impl PromptStore for SelectorCapture {
            async fn get_prompt(
                &self,
                _name: &str,
                selector: &PromptSelector,
            ) -> Result<StoredPrompt> {
                assert_eq!(selector.label.as_deref(), Some("production"));
                assert!(selector.version.is_none());
                Ok(StoredPrompt {
                    prompt: json!("ok"),
                    version: None,
                    config: None,
                })
            }
        }

        let resolver = PromptResolver::new(Box::new(SelectorCapture));
        let mut opts = options("fb");
        opts.version = Some(4);
        let resolved = resolver.resolve("agent.system", &opts).await;
        assert_eq!(resolved.text, "ok");
    }
}
