// src/services/completion.rs
//! Client for the external chat-completion endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::CompletionConfig,
    error::{CompletionError, ConfigError},
};

pub const MODEL: &str = "gpt-3.5-turbo";
pub const TEMPERATURE: f32 = 0.7;
pub const SYSTEM_PROMPT: &str = "You are a knowledgeable Barcelona tour guide. Provide relevant information about landmarks based on user queries. Keep responses concise and informative.";

const REQUEST_TIMEOUT_SECS: u64 = 60;
const FALLBACK_ERROR: &str = "Failed to get response from OpenAI";

#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, query: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'static str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct OpenAiCompleter {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiCompleter {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn complete(&self, query: &str) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: MODEL,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: query },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|error| error.message)
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            debug!(%status, "completion request rejected");
            return Err(CompletionError::api(message));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::api("completion response contained no choices"))
    }
}

/// Stands in when no credential was configured; every call fails.
pub struct UnconfiguredCompleter {
    error: ConfigError,
}

impl UnconfiguredCompleter {
    pub fn new(error: ConfigError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl Completer for UnconfiguredCompleter {
    async fn complete(&self, _query: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Config(self.error.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_system_prompt_then_query() {
        let request = ChatCompletionRequest {
            model: MODEL,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: "Sagrada Família?" },
            ],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Sagrada Família?");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn unconfigured_completer_reports_config_error() {
        let completer = UnconfiguredCompleter::new(ConfigError::MissingCredential {
            var: "OPENAI_API_KEY",
        });
        let err = completer.complete("hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Config(ConfigError::MissingCredential { .. })));
    }
}
