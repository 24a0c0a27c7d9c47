use anyhow::Result;
use jstutor_core::AnthropicClient;
use serde::Serialize;
use serde_json::Value;

use crate::prompt::SYSTEM_PROMPT;

pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

/// Wire shape of a generation reply: either `code` + `explanation`, or an
/// `error` the frontend can display. Absent fields are omitted from the
/// JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CodeReply {
    fn generated(code: String, explanation: String) -> Self {
        Self {
            code: Some(code),
            explanation: Some(explanation),
            error: None,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            code: None,
            explanation: None,
            error: Some(message.to_string()),
        }
    }
}

/// Service for handling code-generation requests
pub struct TutorService {
    anthropic: AnthropicClient,
    model: String,
}

impl TutorService {
    pub fn new(anthropic: AnthropicClient, model: String) -> Self {
        Self { anthropic, model }
    }

    /// Runs one completion and maps the model's reply onto the wire shape.
    /// Transport failures toward Anthropic bubble up as errors; everything
    /// the model itself gets wrong becomes a displayable `error` reply.
    pub async fn generate_code(&self, prompt: &str) -> Result<CodeReply> {
        let reply = self
            .anthropic
            .complete(&self.model, SYSTEM_PROMPT, prompt)
            .await?;
        Ok(parse_model_reply(&reply))
    }
}

// The model is instructed to answer with a bare JSON object or the literal
// `null` for non-coding prompts; anything else is malformed.
fn parse_model_reply(reply: &str) -> CodeReply {
    let reply = reply.trim();

    if reply.eq_ignore_ascii_case("null") {
        return CodeReply::error("Cannot process non-coding questions");
    }

    let Ok(value) = serde_json::from_str::<Value>(reply) else {
        log::warn!("model reply was not valid JSON: {reply}");
        return CodeReply::error("Invalid response format");
    };

    let (Some(code), Some(explanation)) = (
        value.get("code").and_then(Value::as_str),
        value.get("explanation").and_then(Value::as_str),
    ) else {
        return CodeReply::error("Invalid response format");
    };

    CodeReply::generated(code.to_string(), explanation.to_string())
}
