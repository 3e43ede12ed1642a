//! Column profiles and presentation names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::SemanticType;

/// Placeholder headers written by spreadsheet tools for index columns.
static PLACEHOLDER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*unnamed").unwrap());

/// Classification result for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the dataset.
    pub position: usize,
    /// Semantic type.
    pub semantic_type: SemanticType,
}

impl ColumnProfile {
    pub fn new(name: impl Into<String>, position: usize, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            position,
            semantic_type,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.semantic_type.is_numeric()
    }
}

/// Blank names and "unnamed..." placeholders carry no meaning for analysis.
pub fn is_placeholder_name(name: &str) -> bool {
    name.trim().is_empty() || PLACEHOLDER_NAME.is_match(name)
}

/// Human-friendly column name for titles and narratives.
///
/// Placeholders read as "Index"; underscores become spaces and each word is
/// title-cased.
pub fn display_name(name: &str) -> String {
    if PLACEHOLDER_NAME.is_match(name) {
        return "Index".to_string();
    }

    name.replace('_', " ")
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
