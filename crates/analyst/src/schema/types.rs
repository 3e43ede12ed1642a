//! Core type definitions for column classification and profiling results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type assigned to a column once, during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Every non-missing value is a number.
    Numeric,
    /// Anything else: text labels, mixed values.
    Categorical,
}

impl SemanticType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, SemanticType::Numeric)
    }
}

/// Strength bucket for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Bucket an absolute coefficient: above 0.7 strong, above 0.5 moderate.
    pub fn from_coefficient(coefficient: f64) -> Self {
        let magnitude = coefficient.abs();
        if magnitude > 0.7 {
            CorrelationStrength::Strong
        } else if magnitude > 0.5 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Strong => "strong",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sign of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl CorrelationDirection {
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient > 0.0 {
            CorrelationDirection::Positive
        } else {
            CorrelationDirection::Negative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorrelationDirection::Positive => "positive",
            CorrelationDirection::Negative => "negative",
        }
    }
}

impl fmt::Display for CorrelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape of a distribution judged from its skewness statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkewClass {
    Symmetric,
    PositiveSkew,
    NegativeSkew,
}

impl SkewClass {
    /// |skew| below 0.5 is symmetric; otherwise the sign picks the tail.
    pub fn from_skewness(skewness: f64) -> Self {
        if skewness.abs() < 0.5 {
            SkewClass::Symmetric
        } else if skewness > 0.0 {
            SkewClass::PositiveSkew
        } else {
            SkewClass::NegativeSkew
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkewClass::Symmetric => "symmetric",
            SkewClass::PositiveSkew => "positively skewed",
            SkewClass::NegativeSkew => "negatively skewed",
        }
    }
}

impl fmt::Display for SkewClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
