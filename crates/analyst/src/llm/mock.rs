//! Mock LLM provider for testing.

use serde_json::{json, Value};

use crate::error::{AnalystError, Result};

use super::provider::{LlmConfig, LlmProvider, PromptContext};

enum Script {
    /// Derive candidates from the prompt context.
    Echo,
    Candidates(Vec<Value>),
    Failure(String),
}

/// Mock LLM provider that returns predictable responses for testing.
pub struct MockProvider {
    config: LlmConfig,
    script: Script,
}

impl MockProvider {
    /// A mock that suggests one bar chart per numeric column of the context.
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default().with_model("mock"),
            script: Script::Echo,
        }
    }

    /// A mock that always returns `candidates`.
    pub fn with_candidates(candidates: Vec<Value>) -> Self {
        Self {
            script: Script::Candidates(candidates),
            ..Self::new()
        }
    }

    /// A mock whose every call fails with an upstream error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Failure(message.into()),
            ..Self::new()
        }
    }

    fn echo(context: &PromptContext) -> Vec<Value> {
        context
            .numeric_columns
            .iter()
            .take(4)
            .map(|metric| {
                let x = context.categorical_columns.first().unwrap_or(metric);
                json!({
                    "title": format!("📊 {} by {}", metric, x),
                    "chart_type": "bar",
                    "parameters": { "x": x, "y": metric },
                    "insight": format!("Mock suggestion comparing {} across {}.", metric, x)
                })
            })
            .collect()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn suggest_insights(&self, context: &PromptContext) -> Result<Vec<Value>> {
        match &self.script {
            Script::Echo => Ok(Self::echo(context)),
            Script::Candidates(candidates) => Ok(candidates.clone()),
            Script::Failure(message) => Err(AnalystError::Upstream(message.clone())),
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PromptContext {
        PromptContext {
            row_count: 3,
            column_count: 3,
            columns: vec!["region".into(), "sales".into(), "units".into()],
            numeric_columns: vec!["sales".into(), "units".into()],
            categorical_columns: vec!["region".into()],
            findings: Vec::new(),
            sample_rows: Vec::new(),
        }
    }

    #[test]
    fn test_echo_candidates() {
        let candidates = MockProvider::new().suggest_insights(&context()).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0]["parameters"]["x"], "region");
        assert_eq!(candidates[1]["parameters"]["y"], "units");
    }

    #[test]
    fn test_scripted_candidates() {
        let provider = MockProvider::with_candidates(vec![json!({"title": "x"})]);
        assert_eq!(provider.suggest_insights(&context()).unwrap().len(), 1);
    }

    #[test]
    fn test_scripted_failure() {
        let provider = MockProvider::failing("timed out");
        let err = provider.suggest_insights(&context()).unwrap_err();
        assert!(matches!(err, AnalystError::Upstream(ref m) if m == "timed out"));
        assert_eq!(provider.name(), "mock");
    }
}
