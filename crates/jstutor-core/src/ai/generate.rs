use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    error: Option<String>,
    code: Option<String>,
    explanation: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Outcome of one generation request that made it past the transport layer.
///
/// `Refused` is the service declining to generate (e.g. a non-coding
/// prompt); it is displayable and does not end the session. Transport
/// failures are reported as errors by [`GenerateClient::generate`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationReply {
    Generated { code: String, explanation: String },
    Refused(String),
}

/// Client for the tutor service's `/api/generate` endpoint
#[derive(Clone)]
pub struct GenerateClient {
    client: Client,
    base_url: String,
}

impl GenerateClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends one prompt to the service. Exactly one network attempt: no
    /// retries, no timeout, no caching.
    pub async fn generate(&self, prompt: &str) -> Result<GenerationReply> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(anyhow!("generate request failed with status {}: {}", status, detail));
        }

        let body: GenerateResponse = response.json().await?;
        if let Some(error) = body.error {
            return Ok(GenerationReply::Refused(error));
        }

        // Fields are passed through verbatim; the service owns their shape.
        Ok(GenerationReply::Generated {
            code: body.code.unwrap_or_default(),
            explanation: body.explanation.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::spawn_stub_server;

    #[tokio::test]
    async fn test_generate_success_passes_fields_through() {
        let base_url = spawn_stub_server(
            "200 OK",
            r#"{"code": "function add(a,b){return a+b}", "explanation": "adds two numbers"}"#,
        )
        .await;

        let client = GenerateClient::new(&base_url);
        let reply = client.generate("add two numbers").await.unwrap();
        assert_eq!(
            reply,
            GenerationReply::Generated {
                code: "function add(a,b){return a+b}".to_string(),
                explanation: "adds two numbers".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_generate_error_field_becomes_refusal() {
        let base_url = spawn_stub_server("200 OK", r#"{"error": "prompt too vague"}"#).await;

        let client = GenerateClient::new(&base_url);
        let reply = client.generate("???").await.unwrap();
        assert_eq!(reply, GenerationReply::Refused("prompt too vague".to_string()));
    }

    #[tokio::test]
    async fn test_generate_non_success_carries_detail() {
        let base_url = spawn_stub_server("500 Internal Server Error", r#"{"detail": "model exploded"}"#).await;

        let client = GenerateClient::new(&base_url);
        let err = client.generate("add two numbers").await.unwrap_err();
        assert!(err.to_string().contains("model exploded"));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_generate_non_success_without_detail_uses_fallback() {
        let base_url = spawn_stub_server("502 Bad Gateway", "upstream says no").await;

        let client = GenerateClient::new(&base_url);
        let err = client.generate("add two numbers").await.unwrap_err();
        assert!(err.to_string().contains("API request failed"));
    }

    #[tokio::test]
    async fn test_generate_connection_refused_is_an_error() {
        // Port 1 is never listening on loopback.
        let client = GenerateClient::new("http://127.0.0.1:1");
        assert!(client.generate("add two numbers").await.is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GenerateClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
