//! Chat-completion client
//!
//! Posts a system/user message pair to `{base}/chat/completions` and
//! returns the first choice's content. The response is free-form text;
//! callers parse it with [`crate::exam::parser`].

use crate::config::AppConfig;
use crate::{Result, VivaError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Client for the hosted chat-completion API
pub struct ChatClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl ChatClient {
    /// Create a new chat client from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| VivaError::ChatApiError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.chat_api_key.clone(),
            api_base: config.chat_api_base.trim_end_matches('/').to_string(),
            model: config.chat_model.clone(),
        })
    }

    /// Send a completion request and return the trimmed response text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        debug!("Calling chat API, model: {}", self.model);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Chat API request failed: {}", e);
                VivaError::ChatApiError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Chat API returned {}: {}", status, body);
            return Err(VivaError::ChatApiError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| VivaError::ChatApiError(format!("Malformed API response: {}", e)))?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| VivaError::ChatApiError("API returned no content".to_string()))?;

        debug!("Chat API returned {} chars", content.len());
        Ok(content.trim().to_string())
    }
}
