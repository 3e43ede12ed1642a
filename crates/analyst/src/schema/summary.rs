//! Profiling results: correlations, top performers and distributions.

use serde::{Deserialize, Serialize};

use super::types::{CorrelationDirection, CorrelationStrength, SkewClass};

/// A notable linear association between two numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub column_a: String,
    pub column_b: String,
    /// Pearson coefficient, rounded to two decimals.
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

/// A group and its mean metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub name: String,
    pub mean_value: f64,
}

/// The best and runner-up groups of the first categorical column, ranked by
/// the mean of the first numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformerRecord {
    pub grouping_column: String,
    pub metric_column: String,
    pub top_group: GroupMean,
    pub second_group: GroupMean,
    /// How far the top group leads the second, in percent.
    pub percent_difference: f64,
    /// Number of distinct groups in the grouping column.
    pub total_group_count: usize,
    /// Number of groups a ranked chart would show (at most 15).
    pub shown_group_count: usize,
}

/// Spread, outliers and shape of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub column: String,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// Standard deviation as a percentage of the mean.
    pub coefficient_of_variation: f64,
    /// Share of rows outside the 1.5 x IQR fences, in percent.
    pub outlier_percent: f64,
    pub skew_class: SkewClass,
}

/// Everything a profiling pass learned about a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub row_count: usize,
    pub column_count: usize,
    /// Numeric column names in declaration order.
    pub numeric_columns: Vec<String>,
    /// Categorical column names in declaration order.
    pub categorical_columns: Vec<String>,
    /// Strongest first.
    pub correlations: Vec<CorrelationPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_performer: Option<TopPerformerRecord>,
    pub distributions: Vec<DistributionRecord>,
}

impl AnalysisSummary {
    /// The strongest correlation, if any qualified.
    pub fn strongest_correlation(&self) -> Option<&CorrelationPair> {
        self.correlations.first()
    }

    pub fn first_categorical(&self) -> Option<&str> {
        self.categorical_columns.first().map(String::as_str)
    }

    pub fn first_numeric(&self) -> Option<&str> {
        self.numeric_columns.first().map(String::as_str)
    }
}
