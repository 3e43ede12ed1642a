//! Google Gemini `generateContent` provider.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AnalystError, Result};

use super::prompts;
use super::provider::{LlmConfig, LlmProvider, PromptContext};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Google Gemini provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default().with_model(DEFAULT_MODEL))
    }

    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalystError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            AnalystError::Config("GEMINI_API_KEY environment variable not set".to_string())
        })?;
        Self::with_config(api_key, config)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.config.model)
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| AnalystError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "systemInstruction": {
                "parts": [{ "text": prompts::system_prompt() }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": user_prompt }]
                }
            ],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_tokens
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| AnalystError::Upstream(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(AnalystError::Upstream(format!(
                "Gemini error ({}): {}",
                status, error_text
            )));
        }

        let api_response: GenerateResponse = response.json().map_err(|e| {
            AnalystError::Upstream(format!("Failed to parse Gemini response: {}", e))
        })?;

        api_response.text()
    }
}

impl LlmProvider for GeminiProvider {
    fn suggest_insights(&self, context: &PromptContext) -> Result<Vec<Value>> {
        let response = self.send_message(&prompts::insight_prompt(context))?;
        prompts::parse_candidate_list(&response)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Result<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AnalystError::Upstream("No candidates in Gemini response".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(AnalystError::Upstream("No text in Gemini response".to_string()));
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}
