//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;
use crate::error::{ConfigError, GenerationError, Result};
use crate::generator::ContentGenerator;
use crate::types::{GenerationRequest, GenerationResult};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct OpenAiGenerator {
    http_client: Client,
    api_key: SecretString,
    base_url: String,
    model: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(http_client: Client, api_key: SecretString, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: None,
        }
    }

    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when `OPENAI_API_KEY` is unset.
    pub fn from_config(config: &OpenAiConfig, http_client: Client) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingField("OPENAI_API_KEY".to_string()))?;

        let mut generator = Self::new(http_client, api_key, config.base_url.as_str());
        generator.model = config.model.clone();
        Ok(generator)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    async fn complete(&self, request: &GenerationRequest) -> GenerationResult {
        let body = ChatRequest {
            model: &request.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.instruction_text,
                },
            ],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        };

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        tracing::debug!(
            model = %request.model_name,
            duration_ms = start.elapsed().as_millis() as u64,
            "Chat completion finished"
        );

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::Empty)
    }

    fn model_override(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FileConfig};

    #[test]
    fn test_from_config_requires_api_key() {
        let config = Config::resolve(FileConfig::default(), |_| None);
        let result = OpenAiGenerator::from_config(&config.openai, Client::new());
        match result {
            Err(e) => assert!(e.to_string().contains("OPENAI_API_KEY")),
            Ok(_) => panic!("expected missing key error"),
        }
    }

    #[test]
    fn test_from_config_carries_model_override() {
        let config = Config::resolve(FileConfig::default(), |key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "DAILYCAST_MODEL" => Some("gpt-4o".to_string()),
            _ => None,
        });
        let generator = OpenAiGenerator::from_config(&config.openai, Client::new()).unwrap();
        assert_eq!(generator.model_override(), Some("gpt-4o"));
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let generator =
            OpenAiGenerator::new(Client::new(), SecretString::from("k"), "http://localhost/v1/");
        assert_eq!(generator.base_url, "http://localhost/v1");
    }

    #[test]
    fn test_chat_request_shape() {
        let body = ChatRequest {
            model: "gpt-4",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "persona",
                },
                ChatMessage {
                    role: "user",
                    content: "prompt",
                },
            ],
            max_tokens: 500,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "prompt");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn test_response_without_content_parses() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
