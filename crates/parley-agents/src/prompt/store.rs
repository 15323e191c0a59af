//! Remote prompt store access.
//!
//! The production store is Langfuse, reached through its public prompts API
//! with basic authentication. The `PromptStore` trait is the seam the
//! resolver works against so tests can inject stub stores.

use async_trait::async_trait;
use parley_core::error::{ParleyError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::time::Duration;

const PROMPTS_API_PATH: &str = "api/public/v2/prompts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which version of a prompt to fetch.
///
/// Label and version are mutually exclusive selectors; when both are set the
/// label takes precedence (enforced by the resolver).
#[derive(Debug, Clone, Default)]
pub struct PromptSelector {
    /// Deployment label, e.g. "production" or "staging".
    pub label: Option<String>,
    /// Explicit prompt version number.
    pub version: Option<u32>,
}

/// A prompt as returned by the remote store, before substitution.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredPrompt {
    /// The template. Text prompts are a JSON string; chat prompts are a
    /// structured value and get JSON-stringified for template purposes.
    pub prompt: Value,
    /// Version number assigned by the store.
    #[serde(default)]
    pub version: Option<u32>,
    /// Free-form configuration object attached to the prompt.
    #[serde(default)]
    pub config: Option<Value>,
}

impl StoredPrompt {
    /// The raw template text.
    pub fn template_text(&self) -> String {
        match &self.prompt {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Optional model identifier from the prompt's config object.
    ///
    /// Reads `config.model`, falling back to `config.modelId`. Absent when
    /// neither is a string; the caller applies its own default.
    pub fn model_id(&self) -> Option<String> {
        let config = self.config.as_ref()?;
        config
            .get("model")
            .or_else(|| config.get("modelId"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Abstraction over the remote prompt-management service.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Fetches the named prompt. Any transport or not-found condition is an
    /// error; the resolver absorbs it into a fallback.
    async fn get_prompt(&self, name: &str, selector: &PromptSelector) -> Result<StoredPrompt>;
}

/// Langfuse connection settings.
#[derive(Debug, Clone)]
pub struct LangfuseConfig {
    /// API public key.
    pub public_key: String,
    /// API secret key.
    pub secret_key: String,
    /// Endpoint base URL, e.g. "https://cloud.langfuse.com".
    pub base_url: String,
}

impl LangfuseConfig {
    /// Loads the configuration from environment variables.
    ///
    /// Requires `LANGFUSE_PUBLIC_KEY`, `LANGFUSE_SECRET_KEY` and
    /// `LANGFUSE_BASE_URL`. Returns `None` when any of them is missing:
    /// configuration absence is expected and non-exceptional, the caller
    /// resolves prompts from fallbacks instead.
    pub fn from_env() -> Option<Self> {
        let public_key = env::var("LANGFUSE_PUBLIC_KEY").ok()?;
        let secret_key = env::var("LANGFUSE_SECRET_KEY").ok()?;
        let base_url = env::var("LANGFUSE_BASE_URL").ok()?;
        Some(Self {
            public_key,
            secret_key,
            base_url,
        })
    }
}

/// HTTP client for the Langfuse public prompts API.
#[derive(Debug, Clone)]
pub struct LangfuseClient {
    client: Client,
    config: LangfuseConfig,
}

impl LangfuseClient {
    /// Creates a client with the provided connection settings.
    pub fn new(config: LangfuseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a client from environment variables, or `None` when the
    /// Langfuse credentials are not configured.
    pub fn from_env() -> Option<Self> {
        LangfuseConfig::from_env().map(Self::new)
    }

    fn prompt_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            PROMPTS_API_PATH,
            name
        )
    }
}

#[async_trait]
impl PromptStore for LangfuseClient {
    async fn get_prompt(&self, name: &str, selector: &PromptSelector) -> Result<StoredPrompt> {
        let mut request = self
            .client
            .get(self.prompt_url(name))
            .basic_auth(&self.config.public_key, Some(&self.config.secret_key))
            .timeout(REQUEST_TIMEOUT);

        if let Some(label) = &selector.label {
            request = request.query(&[("label", label.as_str())]);
        } else if let Some(version) = selector.version {
            request = request.query(&[("version", version.to_string())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ParleyError::remote(format!("prompt fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ParleyError::remote(format!(
                "prompt store returned {status}: {body}"
            )));
        }

        response
            .json::<StoredPrompt>()
            .await
            .map_err(|e| ParleyError::remote(format!("prompt response decode failed: {e}")))
    }
}
