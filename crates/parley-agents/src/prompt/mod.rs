//! Prompt resolution for agents.
//!
//! Agent instructions are preferably fetched from a remote prompt-management
//! store (Langfuse) and variable-substituted; every failure mode degrades to
//! a local fallback string so resolution never surfaces an error to the
//! request path.
//!
//! # Module Structure
//!
//! - `template`: Minimal `{{key}}` substitution routine
//! - `store`: The `PromptStore` trait and the Langfuse HTTP client
//! - `resolver`: The never-failing `resolve` entry point

mod resolver;
mod store;
mod template;

pub use resolver::{
    FallbackReason, PromptMetadata, PromptResolver, PromptSource, ResolveOptions, ResolvedPrompt,
};
pub use store::{LangfuseClient, LangfuseConfig, PromptSelector, PromptStore, StoredPrompt};
pub use template::{render, replace_literal, TemplateError};
