//! Projects a dataset onto chart-ready series.

use indexmap::IndexMap;
use tracing::debug;

use super::types::{
    Aggregation, CategoricalSeries, ChartPayload, ChartRequest, ChartType, ScatterPoint,
    ScatterSample, SeriesValue,
};
use crate::error::{AnalystError, Result};
use crate::input::{Column, Dataset};
use crate::stats::round2;

#[derive(Debug, Clone)]
pub struct ProjectorConfig {
    /// Scatter payloads above this many points are sampled down to it.
    pub max_scatter_points: usize,
    /// Seed for scatter sampling.
    pub sample_seed: u64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            max_scatter_points: 500,
            sample_seed: 42,
        }
    }
}

/// Builds [`ChartPayload`]s for chart requests.
///
/// Categorical charts keep every distinct category in first-appearance
/// order. Scatter charts are capped, and the cap is applied with a seeded
/// sample so repeated requests see the same points.
pub struct ChartProjector {
    config: ProjectorConfig,
}

impl ChartProjector {
    pub fn new() -> Self {
        Self {
            config: ProjectorConfig::default(),
        }
    }

    pub fn with_config(config: ProjectorConfig) -> Self {
        Self { config }
    }

    /// Project `dataset` for `request`.
    ///
    /// Fails with `MissingColumn` when x or a supplied y does not exist, and
    /// with `MissingParameter` for a scatter request without y.
    pub fn project(&self, dataset: &Dataset, request: &ChartRequest) -> Result<ChartPayload> {
        let x = require_column(dataset, &request.x)?;
        let y = request
            .y
            .as_deref()
            .map(|name| require_column(dataset, name))
            .transpose()?;

        match request.chart_type {
            ChartType::Scatter => {
                let y = y.ok_or_else(|| AnalystError::MissingParameter {
                    chart_type: ChartType::Scatter.to_string(),
                    parameter: "y".to_string(),
                })?;
                Ok(ChartPayload::Scatter(self.scatter(dataset, x, y)))
            }
            _ => Ok(ChartPayload::Categorical(categorical(x, y))),
        }
    }

    fn scatter(&self, dataset: &Dataset, x: &Column, y: &Column) -> ScatterSample {
        let complete: Vec<ScatterPoint> = x
            .values
            .iter()
            .zip(&y.values)
            .filter(|(a, b)| !a.is_missing() && !b.is_missing())
            .map(|(a, b)| ScatterPoint {
                x: a.clone(),
                y: b.clone(),
            })
            .collect();

        let limit = self.config.max_scatter_points;
        let sampled = complete.len() > limit;

        let points = if sampled {
            debug!(rows = complete.len(), limit, "sampling scatter points");
            sample_indices(complete.len(), limit, self.config.sample_seed)
                .into_iter()
                .map(|i| complete[i].clone())
                .collect()
        } else {
            complete
        };

        ScatterSample {
            x: x.name.clone(),
            y: y.name.clone(),
            displayed_count: points.len(),
            points,
            sampled,
            original_count: dataset.row_count(),
        }
    }
}

impl Default for ChartProjector {
    fn default() -> Self {
        Self::new()
    }
}

fn require_column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column> {
    dataset.column(name).ok_or_else(|| AnalystError::MissingColumn {
        column: name.to_string(),
    })
}

/// Mean of y per x group when y is numeric, otherwise category counts.
fn categorical(x: &Column, y: Option<&Column>) -> CategoricalSeries {
    if let Some(y) = y.filter(|c| c.is_numeric()) {
        match grouped_means(x, y) {
            Some(series) => return series,
            None => {
                debug!(x = %x.name, y = %y.name, "group without values, counting by frequency");
                return frequency_ranked(x);
            }
        }
    }

    let counts = category_counts(x);
    series(
        counts.into_iter().map(|(label, n)| (label, SeriesValue::Count(n))),
        Aggregation::Count,
    )
}

/// `None` when some group has no numeric y to average.
fn grouped_means(x: &Column, y: &Column) -> Option<CategoricalSeries> {
    let mut groups: IndexMap<String, (f64, usize)> = IndexMap::new();
    for (row, cell) in x.values.iter().enumerate() {
        if cell.is_missing() {
            continue;
        }
        let entry = groups.entry(cell.label()).or_insert((0.0, 0));
        if let Some(value) = y.get(row).and_then(|v| v.as_number()) {
            entry.0 += value;
            entry.1 += 1;
        }
    }

    if groups.values().any(|(_, count)| *count == 0) {
        return None;
    }

    Some(series(
        groups
            .into_iter()
            .map(|(label, (sum, count))| (label, SeriesValue::Measure(round2(sum / count as f64)))),
        Aggregation::Mean,
    ))
}

/// Counts ordered from most to least frequent; ties keep appearance order.
fn frequency_ranked(x: &Column) -> CategoricalSeries {
    let mut counts: Vec<(String, usize)> = category_counts(x).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    series(
        counts.into_iter().map(|(label, n)| (label, SeriesValue::Count(n))),
        Aggregation::Count,
    )
}

/// Occurrences of each non-missing category, in first-appearance order.
fn category_counts(x: &Column) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for cell in x.values.iter().filter(|c| !c.is_missing()) {
        *counts.entry(cell.label()).or_insert(0) += 1;
    }
    counts
}

fn series(
    entries: impl Iterator<Item = (String, SeriesValue)>,
    aggregation: Aggregation,
) -> CategoricalSeries {
    let (labels, values): (Vec<String>, Vec<SeriesValue>) = entries.unzip();
    CategoricalSeries {
        total_items: labels.len(),
        labels,
        values,
        aggregation,
    }
}

/// Choose `k` of `n` indices with a seeded partial Fisher-Yates shuffle,
/// returned in ascending order.
fn sample_indices(n: usize, k: usize, seed: u64) -> Vec<usize> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    let k = k.min(n);
    for i in 0..k {
        let j = rng.usize(i..n);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices.sort_unstable();
    indices
}
