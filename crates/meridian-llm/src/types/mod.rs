//! Canonical shapes shared by the complete and streaming paths

mod message;
mod response;

pub(crate) use message::DEFAULT_ROLE;
pub use message::{CanonicalMessage, ChatMessage, ToolCallInvocation};
pub use response::{FinishReason, Usage, UsageReport};
