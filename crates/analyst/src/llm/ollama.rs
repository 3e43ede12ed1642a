//! Ollama local LLM provider implementation.
//!
//! Ollama allows running LLMs locally without API keys.
//! Install from: https://ollama.ai

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AnalystError, Result};

use super::prompts;
use super::provider::{LlmConfig, LlmProvider, PromptContext};

/// Default Ollama API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:11434/api/chat";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Ollama local LLM provider.
pub struct OllamaProvider {
    client: Client,
    api_url: String,
    config: LlmConfig,
}

impl OllamaProvider {
    /// Create a provider for the default model. Make sure you've pulled it:
    /// `ollama pull llama3.2`
    pub fn new() -> Result<Self> {
        Self::with_config(LlmConfig::default().with_model(DEFAULT_MODEL))
    }

    /// Create with custom configuration. `OLLAMA_HOST` overrides the
    /// server address.
    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalystError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_url = std::env::var("OLLAMA_HOST")
            .map(|host| format!("{}/api/chat", host.trim_end_matches('/')))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens
            },
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AnalystError::Upstream(
                        "Failed to connect to Ollama. Is it running? Start with: ollama serve"
                            .to_string(),
                    )
                } else {
                    AnalystError::Upstream(format!("Ollama request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if error_text.contains("not found") {
                return Err(AnalystError::Upstream(format!(
                    "Model '{}' not found. Pull it with: ollama pull {}",
                    self.config.model, self.config.model
                )));
            }

            return Err(AnalystError::Upstream(format!(
                "Ollama error ({}): {}",
                status, error_text
            )));
        }

        let api_response: OllamaResponse = response.json().map_err(|e| {
            AnalystError::Upstream(format!("Failed to parse Ollama response: {}", e))
        })?;

        Ok(api_response.message.content)
    }
}

impl LlmProvider for OllamaProvider {
    fn suggest_insights(&self, context: &PromptContext) -> Result<Vec<Value>> {
        let response = self.send_message(&prompts::insight_prompt(context))?;
        prompts::parse_candidate_list(&response)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let provider = OllamaProvider::new().unwrap();
        assert_eq!(provider.config().model, "llama3.2");
        assert!(provider.api_url.ends_with("/api/chat"));
    }

    #[test]
    fn test_response_shape() {
        let raw = r#"{"model": "llama3.2", "message": {"role": "assistant", "content": "[]"}, "done": true}"#;
        let parsed: OllamaResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.message.content, "[]");
    }
}
