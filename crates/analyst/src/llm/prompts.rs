//! Prompt templates and response parsing for insight suggestions.

use serde_json::Value;

use crate::error::{AnalystError, Result};

use super::provider::PromptContext;

/// System prompt shared by every provider.
pub fn system_prompt() -> &'static str {
    "You are a senior business intelligence consultant presenting to C-level executives. \
     You turn tabular data into a few sharp, actionable chart recommendations. \
     You always respond with valid JSON only, no prose around it."
}

/// Build the prompt asking for four chart suggestions.
pub fn insight_prompt(context: &PromptContext) -> String {
    let findings = if context.findings.is_empty() {
        "No preliminary findings".to_string()
    } else {
        context
            .findings
            .iter()
            .map(|f| format!("- {}", f))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let sample = serde_json::to_string_pretty(&context.sample_rows)
        .unwrap_or_else(|_| "[]".to_string());

    let columns = quoted_list(&context.columns);

    format!(
        r#"# DATASET
- Rows: {rows} records
- Columns: {columns}
- Numeric: {numeric}
- Categorical: {categorical}

# PRELIMINARY FINDINGS (already computed)
{findings}

# DATA SAMPLE
{sample}

# YOUR TASK
Propose 4 visualizations, each with an ACTIONABLE insight for executive decisions.

# COMMUNICATION STYLE
- Titles: specific and executive, with a number where possible. Use emojis sparingly.
  Good: "🏆 North region generates 3x more revenue"
  Good: "⚠️ High volatility in operating costs (risk)"
  Bad: "Sales analysis by region" (too generic)
  Bad: "Bar chart of X" (describes the format, not the finding)
- Insights: 2-3 sentences with a concrete recommendation, like a strategy consultant.

# REQUIRED FORMAT
Respond ONLY with a JSON array:
```json
[
  {{
    "title": "Emoji + specific finding with a number",
    "chart_type": "bar|line|pie|scatter|area",
    "parameters": {{"x": "exact_column", "y": "exact_column"}},
    "insight": "Executive analysis in 2-3 sentences with an actionable recommendation."
  }}
]
```

VALID COLUMNS: {columns}
"#,
        rows = context.row_count,
        columns = columns,
        numeric = quoted_list(&context.numeric_columns),
        categorical = quoted_list(&context.categorical_columns),
        findings = findings,
        sample = sample,
    )
}

/// Parse a model response into a candidate list, stripping markdown code
/// fences if present. Anything but a JSON array is an upstream error.
pub fn parse_candidate_list(response: &str) -> Result<Vec<Value>> {
    let json_str = if response.contains("```json") {
        response
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .unwrap_or(response)
    } else if response.contains("```") {
        response
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .unwrap_or(response)
    } else {
        response.trim()
    };

    match serde_json::from_str(json_str) {
        Ok(Value::Array(candidates)) => Ok(candidates),
        Ok(other) => Err(AnalystError::Upstream(format!(
            "expected a JSON array of suggestions, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(AnalystError::Upstream(format!(
            "Failed to parse LLM JSON response: {}",
            e
        ))),
    }
}

fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("\"{}\"", n)).collect();
    format!("[{}]", quoted.join(", "))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
