//! LLM provider trait and prompt context.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::input::{format_number, Dataset};
use crate::schema::AnalysisSummary;

/// Rows included as a data sample in the prompt.
const SAMPLE_ROWS: usize = 3;

/// What a provider is told about a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptContext {
    pub row_count: usize,
    pub column_count: usize,
    /// Every column name, placeholders included.
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    /// Preliminary findings already computed locally.
    pub findings: Vec<String>,
    /// The first few rows as JSON records.
    pub sample_rows: Vec<Map<String, Value>>,
}

impl PromptContext {
    /// Build the context from a dataset and its profiling summary.
    pub fn from_analysis(dataset: &Dataset, summary: &AnalysisSummary) -> Self {
        let mut findings = Vec::new();

        if let Some(pair) = summary.strongest_correlation() {
            findings.push(format!(
                "{} {} correlation ({}) between {} and {}",
                pair.strength,
                pair.direction,
                format_number(pair.coefficient),
                pair.column_a,
                pair.column_b
            ));
        }
        if let Some(record) = &summary.top_performer {
            findings.push(format!(
                "{} leads in {} with {}",
                record.top_group.name,
                record.metric_column,
                format_number(record.top_group.mean_value)
            ));
        }
        if let Some(record) = summary.distributions.first() {
            findings.push(format!(
                "{} has CV={}% and {}% outliers",
                record.column,
                format_number(record.coefficient_of_variation),
                format_number(record.outlier_percent)
            ));
        }

        Self {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            columns: dataset.column_names().into_iter().map(String::from).collect(),
            numeric_columns: summary.numeric_columns.clone(),
            categorical_columns: summary.categorical_columns.clone(),
            findings,
            sample_rows: dataset.head_records(SAMPLE_ROWS),
        }
    }
}

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "claude-sonnet-4-20250514").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,

    /// HTTP timeout for one suggestion request.
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 2048,
            temperature: 0.4,
            timeout_secs: 30,
        }
    }
}

/// An external, untrusted producer of insight candidates.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can
/// serve concurrent analyses. Whatever they return is checked by
/// [`crate::insight::CandidateValidator`] before use.
pub trait LlmProvider: Send + Sync {
    /// Ask the model for chart suggestions. Returns the raw candidate list;
    /// transport and parse failures are `AnalystError::Upstream`.
    fn suggest_insights(&self, context: &PromptContext) -> Result<Vec<Value>>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
