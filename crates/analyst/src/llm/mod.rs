//! LLM providers as an optional source of chart suggestions.
//!
//! A provider turns a [`PromptContext`] into a list of candidate insights.
//! Candidates are untrusted: the analyst validates them against the
//! dataset's columns and falls back to rule-based insights when a provider
//! fails or returns too few usable candidates. Everything works without one.
//!
//! # Supported Providers
//!
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **Gemini** - Google models via API (requires `GEMINI_API_KEY`)
//! - **Ollama** - Local models, no API key needed (requires Ollama installed)
//!
//! # Example
//!
//! ```no_run
//! use analyst::{Analyst, OllamaProvider};
//!
//! let analyst = Analyst::new().with_llm(OllamaProvider::new().unwrap());
//! let (_, report) = analyst.analyze_file("sales.csv").unwrap();
//! println!("{} insights from {}", report.insights.len(), report.insight_source);
//! ```

mod anthropic;
mod gemini;
mod mock;
mod ollama;
pub mod prompts;
mod provider;

pub use anthropic::AnthropicProvider;
pub use gemini::{GeminiProvider, DEFAULT_MODEL as GEMINI_DEFAULT_MODEL};
pub use mock::MockProvider;
pub use ollama::{OllamaProvider, DEFAULT_MODEL as OLLAMA_DEFAULT_MODEL};
pub use provider::{LlmConfig, LlmProvider, PromptContext};
