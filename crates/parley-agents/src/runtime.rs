//! Process-wide runtime state.
//!
//! The agent registry and its resolved prompts are expensive, read-mostly
//! state that must be initialized exactly once per process, including in
//! host environments that reuse a long-lived process across requests
//! (hot-reload/singleton pattern). Independent sessions read it
//! concurrently; each session owns its own mutable message list.

use tokio::sync::OnceCell;
use tracing::info;

use crate::prompt::{LangfuseClient, PromptResolver};
use crate::registry::{AgentRegistry, ManagedPromptSettings};

static RUNTIME: OnceCell<Runtime> = OnceCell::const_new();

/// Shared, read-only runtime state for the request path.
pub struct Runtime {
    registry: AgentRegistry,
}

impl Runtime {
    /// Builds a runtime from the environment: Langfuse credentials when
    /// present, fallback-only resolution otherwise.
    pub async fn from_env() -> Self {
        let resolver = match LangfuseClient::from_env() {
            Some(client) => PromptResolver::new(Box::new(client)),
            None => PromptResolver::without_store(),
        };
        let settings = ManagedPromptSettings::from_env();
        Self::with_resolver(&resolver, &settings).await
    }

    /// Builds a runtime with an explicit resolver (used by tests and hosts
    /// that manage configuration themselves).
    pub async fn with_resolver(
        resolver: &PromptResolver,
        settings: &ManagedPromptSettings,
    ) -> Self {
        let registry = AgentRegistry::initialize(resolver, settings).await;
        info!(
            agents = registry.agent_names().len(),
            remote_prompts = resolver.has_store(),
            "runtime initialized"
        );
        Self { registry }
    }

    /// The fixed agent registry.
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }
}

/// Returns the process-wide runtime, initializing it on first access.
///
/// Initialization is the only suspending operation on the server-side path
/// (the remote prompt fetch); concurrent first callers await the same
/// initialization and later callers get the cached instance.
pub async fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(Runtime::from_env).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptResolver;

    #[tokio::test]
    async fn test_runtime_serves_registry() {
        let runtime = Runtime::with_resolver(
            &PromptResolver::without_store(),
            &ManagedPromptSettings::default(),
        )
        .await;
        assert!(runtime.registry().contains("weatherAgent"));
    }

    #[tokio::test]
    async fn test_global_runtime_initializes_once() {
        let first = runtime().await;
        let second = runtime().await;
        assert!(std::ptr::eq(first, second));
    }
}
