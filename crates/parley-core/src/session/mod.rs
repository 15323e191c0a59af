//! Chat session domain module.
//!
//! This module contains the client-side state of one conversation: the
//! status state machine, the uncommitted draft, and the accumulation of
//! streamed assistant parts.
//!
//! # Module Structure
//!
//! - `model`: Session state types (`ChatStatus`, `Draft`, `ChatSubmission`)
//! - `manager`: The conversation state machine (`ChatSession`)

mod manager;
mod model;

// Re-export public API
pub use manager::ChatSession;
pub use model::{ChatStatus, ChatSubmission, Draft};
