use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::{FactoryError, Result};
use crate::wire::ChatRequest;

/// OpenAI adapter posting the `ChatRequest` body to /v1/chat/completions.
pub struct OpenAIProvider {
    api_key: String,
    client: Client,
    timeout_secs: u64,
}

impl OpenAIProvider {
    pub fn new(api_key: String, timeout_secs: u64) -> Self {
        Self { api_key, client: Client::new(), timeout_secs }
    }
}

#[async_trait]
impl super::ChatProvider for OpenAIProvider {
    async fn complete(&self, req: &ChatRequest, debug: bool) -> Result<String> {
        if debug {
            let body = serde_json::to_string_pretty(req)
                .map_err(|e| FactoryError::Generation(e.to_string()))?;
            eprintln!("debug[openai]: HTTP POST /v1/chat/completions body:\n{body}");
        }

        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(req)
            .send()
            .await
            .map_err(|e| FactoryError::Generation(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| FactoryError::Generation(format!("reading response body: {e}")))?;

        if debug {
            eprintln!("debug[openai]: raw status: {status}");
            eprintln!("debug[openai]: raw response:\n{text}");
        }

        if !status.is_success() {
            return Err(FactoryError::Generation(format!("OpenAI API error ({status}): {text}")));
        }

        // Minimal structs to parse the chat response
        #[derive(Deserialize)]
        struct ChatMessage {
            content: String,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
        }
        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            FactoryError::Generation(format!("failed to parse OpenAI response: {e}\nRaw: {text}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| FactoryError::Generation("response contained no choices".into()))
    }
}
