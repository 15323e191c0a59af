pub mod error;
pub mod message;
pub mod session;
pub mod slash_command;
pub mod stream;

// Re-export common error type
pub use error::ParleyError;
pub use message::{Message, MessageRole, Part, ToolInvocationState};
pub use stream::StreamEvent;
