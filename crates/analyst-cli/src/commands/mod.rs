//! CLI command implementations.

pub mod analyze;
pub mod chart;
pub mod serve;

use std::sync::Arc;

use analyst::llm::{GEMINI_DEFAULT_MODEL, OLLAMA_DEFAULT_MODEL};
use analyst::{
    AnthropicProvider, GeminiProvider, LlmConfig, LlmProvider, MockProvider, OllamaProvider,
};

use crate::cli::LlmProviderChoice;

/// Build the suggestion provider for `choice`, or `None` for rules only.
///
/// Fails when a hosted provider is chosen but its API key is not set.
pub fn build_provider(
    choice: LlmProviderChoice,
    model: Option<String>,
    timeout_secs: u64,
) -> Result<Option<Arc<dyn LlmProvider>>, Box<dyn std::error::Error>> {
    let config = |default_model: &str| {
        LlmConfig::default()
            .with_model(model.clone().unwrap_or_else(|| default_model.to_string()))
            .with_timeout_secs(timeout_secs)
    };

    let provider: Arc<dyn LlmProvider> = match choice {
        LlmProviderChoice::None => return Ok(None),
        LlmProviderChoice::Mock => Arc::new(MockProvider::new()),
        LlmProviderChoice::Anthropic => {
            let default_model = LlmConfig::default().model;
            Arc::new(AnthropicProvider::from_env(config(&default_model))?)
        }
        LlmProviderChoice::Gemini => {
            Arc::new(GeminiProvider::from_env(config(GEMINI_DEFAULT_MODEL))?)
        }
        LlmProviderChoice::Ollama => {
            Arc::new(OllamaProvider::with_config(config(OLLAMA_DEFAULT_MODEL))?)
        }
    };

    Ok(Some(provider))
}
