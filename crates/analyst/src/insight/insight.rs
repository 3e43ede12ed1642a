//! Insight records: a titled finding plus the chart that shows it.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartRequest, ChartType};

/// Columns an insight's chart is drawn over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightParameters {
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

/// A human-readable finding with a chart recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub chart_type: ChartType,
    pub parameters: InsightParameters,
    /// Narrative text; serialized as `insight` to match the upload response.
    #[serde(rename = "insight")]
    pub narrative: String,
}

impl Insight {
    pub fn new(
        title: impl Into<String>,
        chart_type: ChartType,
        x: impl Into<String>,
        y: Option<&str>,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            chart_type,
            parameters: InsightParameters {
                x: x.into(),
                y: y.map(str::to_string),
            },
            narrative: narrative.into(),
        }
    }

    /// The chart request that renders this insight.
    pub fn chart_request(&self) -> ChartRequest {
        ChartRequest::new(
            self.chart_type,
            self.parameters.x.clone(),
            self.parameters.y.clone(),
        )
    }
}
