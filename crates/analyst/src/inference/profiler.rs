//! Statistical profiling: correlations, top performers and distributions.

use indexmap::IndexMap;
use tracing::debug;

use crate::input::{Column, Dataset};
use crate::schema::{
    AnalysisSummary, ColumnProfile, CorrelationDirection, CorrelationPair, CorrelationStrength,
    DistributionRecord, GroupMean, SkewClass, TopPerformerRecord,
};
use crate::stats::{self, round2, StatError, StatResult};

/// Tuning knobs for a profiling pass.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Only the first N numeric columns are paired for correlations.
    pub max_correlation_columns: usize,
    /// Pairs with |r| at or below this are dropped.
    pub correlation_threshold: f64,
    /// Groups a ranked chart would show.
    pub max_shown_groups: usize,
    /// Only the first N numeric columns get a distribution record.
    pub max_distribution_columns: usize,
    /// Outlier fence multiplier for the IQR method.
    pub iqr_multiplier: f64,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            max_correlation_columns: 5,
            correlation_threshold: 0.3,
            max_shown_groups: 15,
            max_distribution_columns: 3,
            iqr_multiplier: 1.5,
        }
    }
}

/// Computes an [`AnalysisSummary`] from a dataset and its column profiles.
///
/// Each statistic is computed independently. One that cannot be evaluated
/// (zero variance, too few values, no groups) is omitted from the summary and
/// never aborts the pass.
pub struct StatisticalProfiler {
    config: ProfilerConfig,
}

impl StatisticalProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self {
            config: ProfilerConfig::default(),
        }
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Run a full profiling pass.
    pub fn profile(&self, dataset: &Dataset, profiles: &[ColumnProfile]) -> AnalysisSummary {
        let (numeric, categorical): (Vec<&ColumnProfile>, Vec<&ColumnProfile>) =
            profiles.iter().partition(|p| p.is_numeric());

        let numeric_columns: Vec<&Column> = numeric
            .iter()
            .filter_map(|p| dataset.column(&p.name))
            .collect();
        let categorical_columns: Vec<&Column> = categorical
            .iter()
            .filter_map(|p| dataset.column(&p.name))
            .collect();

        let correlations = self.correlations(&numeric_columns);

        let top_performer = match (categorical_columns.first(), numeric_columns.first()) {
            (Some(group), Some(metric)) => match self.top_performer(group, metric) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(group = %group.name, metric = %metric.name, error = %e, "top performer omitted");
                    None
                }
            },
            _ => None,
        };

        let distributions = numeric_columns
            .iter()
            .take(self.config.max_distribution_columns)
            .filter_map(|column| match self.distribution(column, dataset.row_count()) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(column = %column.name, error = %e, "distribution omitted");
                    None
                }
            })
            .collect();

        AnalysisSummary {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            numeric_columns: numeric.iter().map(|p| p.name.clone()).collect(),
            categorical_columns: categorical.iter().map(|p| p.name.clone()).collect(),
            correlations,
            top_performer,
            distributions,
        }
    }

    /// Pairwise correlations among the leading numeric columns, strongest
    /// first. Ties keep discovery order.
    fn correlations(&self, numeric: &[&Column]) -> Vec<CorrelationPair> {
        let leading: Vec<(&Column, Vec<Option<f64>>)> = numeric
            .iter()
            .take(self.config.max_correlation_columns)
            .map(|c| (*c, numeric_cells(c)))
            .collect();

        let mut pairs = Vec::new();
        for (i, (a, a_cells)) in leading.iter().enumerate() {
            for (b, b_cells) in leading.iter().skip(i + 1) {
                match stats::pearson(a_cells, b_cells) {
                    Ok(r) if r.abs() > self.config.correlation_threshold => {
                        pairs.push(CorrelationPair {
                            column_a: a.name.clone(),
                            column_b: b.name.clone(),
                            coefficient: round2(r),
                            strength: CorrelationStrength::from_coefficient(r),
                            direction: CorrelationDirection::from_coefficient(r),
                        });
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!(a = %a.name, b = %b.name, error = %e, "correlation skipped");
                    }
                }
            }
        }

        pairs.sort_by(|x, y| y.coefficient.abs().total_cmp(&x.coefficient.abs()));
        pairs
    }

    /// Rank groups of `group` by the mean of `metric` and compare the top two.
    fn top_performer(&self, group: &Column, metric: &Column) -> StatResult<TopPerformerRecord> {
        let mut groups: IndexMap<String, (f64, usize)> = IndexMap::new();
        for (row, cell) in group.values.iter().enumerate() {
            if cell.is_missing() {
                continue;
            }
            let entry = groups.entry(cell.label()).or_insert((0.0, 0));
            if let Some(value) = metric.get(row).and_then(|v| v.as_number()) {
                entry.0 += value;
                entry.1 += 1;
            }
        }

        if groups.is_empty() {
            return Err(StatError::Empty);
        }

        let total_group_count = groups.len();

        // Key order first so equal means rank deterministically.
        groups.sort_keys();
        let mut ranked: Vec<(String, f64)> = groups
            .into_iter()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(name, (sum, count))| (name, sum / count as f64))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(self.config.max_shown_groups);

        if ranked.len() < 2 {
            return Err(StatError::InsufficientData {
                needed: 2,
                found: ranked.len(),
            });
        }

        let (top_name, top_mean) = ranked[0].clone();
        let (second_name, second_mean) = ranked[1].clone();

        let percent_difference = if second_mean == 0.0 {
            0.0
        } else {
            (top_mean / second_mean - 1.0) * 100.0
        };
        if !percent_difference.is_finite() {
            return Err(StatError::NonFinite);
        }

        Ok(TopPerformerRecord {
            grouping_column: group.name.clone(),
            metric_column: metric.name.clone(),
            top_group: GroupMean {
                name: top_name,
                mean_value: round2(top_mean),
            },
            second_group: GroupMean {
                name: second_name,
                mean_value: round2(second_mean),
            },
            percent_difference: round2(percent_difference),
            total_group_count,
            shown_group_count: total_group_count.min(self.config.max_shown_groups),
        })
    }

    /// Spread, IQR outliers and skew of one column. Outlier share is taken
    /// over all rows of the dataset, missing cells included.
    fn distribution(&self, column: &Column, row_count: usize) -> StatResult<DistributionRecord> {
        let values = column.numbers();
        let described = stats::describe(&values)?;
        let skewness = stats::skewness(&values)?;

        let outlier_count = values
            .iter()
            .filter(|v| described.is_outlier_iqr(**v, self.config.iqr_multiplier))
            .count();
        let outlier_percent = outlier_count as f64 / row_count.max(1) as f64 * 100.0;

        let coefficient_of_variation = if described.mean == 0.0 {
            0.0
        } else {
            described.std / described.mean * 100.0
        };

        Ok(DistributionRecord {
            column: column.name.clone(),
            mean: round2(described.mean),
            median: round2(described.median),
            std_dev: round2(described.std),
            coefficient_of_variation: round2(coefficient_of_variation),
            outlier_percent: round2(outlier_percent),
            skew_class: SkewClass::from_skewness(skewness),
        })
    }
}

impl Default for StatisticalProfiler {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric_cells(column: &Column) -> Vec<Option<f64>> {
    column.values.iter().map(|v| v.as_number()).collect()
}
