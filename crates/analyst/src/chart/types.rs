//! Chart requests and payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::input::CellValue;

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
    Area,
}

impl ChartType {
    pub const ALL: [ChartType; 5] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Scatter,
        ChartType::Area,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
            ChartType::Area => "area",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown chart type '{}' (expected bar, line, pie, scatter or area)",
                    s
                )
            })
    }
}

/// A request for chart-ready data over one or two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub chart_type: ChartType,
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl ChartRequest {
    pub fn new(chart_type: ChartType, x: impl Into<String>, y: Option<String>) -> Self {
        Self {
            chart_type,
            x: x.into(),
            y,
        }
    }
}

/// How categorical values were aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Mean,
    Count,
}

/// A series value: an integral count or a rounded measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Count(usize),
    Measure(f64),
}

impl SeriesValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            SeriesValue::Count(n) => *n as f64,
            SeriesValue::Measure(v) => *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSeries {
    pub labels: Vec<String>,
    pub values: Vec<SeriesValue>,
    pub aggregation: Aggregation,
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: CellValue,
    pub y: CellValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSample {
    /// Column names plotted on each axis.
    pub x: String,
    pub y: String,
    #[serde(rename = "data")]
    pub points: Vec<ScatterPoint>,
    pub sampled: bool,
    /// Rows in the whole dataset.
    pub original_count: usize,
    pub displayed_count: usize,
}

/// Chart-ready data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartPayload {
    Categorical(CategoricalSeries),
    Scatter(ScatterSample),
}
