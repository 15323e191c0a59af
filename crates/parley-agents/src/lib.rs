//! Server-side agent layer: prompt resolution, the fixed agent registry,
//! and request routing.
//!
//! The crate builds its state once per process ([`runtime`]) and exposes a
//! pure selection path for each chat request ([`api::prepare_chat`]); all
//! remote I/O is confined to initialization.

pub mod api;
pub mod prompt;
pub mod registry;
pub mod router;
pub mod runtime;
pub mod tools;

pub use api::{prepare_chat, ErrorBody, PreparedChat};
pub use registry::{AgentConfig, AgentRegistry, ManagedPromptSettings};
pub use router::{route, ChatRequest, RouteDecision, DEFAULT_AGENT, DEFAULT_MODEL_ID};
pub use runtime::{runtime, Runtime};
