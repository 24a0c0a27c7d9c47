pub mod anthropic;
pub mod generate;

pub use anthropic::AnthropicClient;
pub use generate::{GenerateClient, GenerationReply};
