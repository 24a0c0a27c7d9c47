pub mod ai;
pub mod config;
pub mod conversation;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types for convenience
pub use ai::{AnthropicClient, GenerateClient, GenerationReply};
pub use config::Config;
pub use conversation::{ChatController, Conversation};
pub use state::{Message, MessageKind, QuickAction, QUICK_ACTIONS};
