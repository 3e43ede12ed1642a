//! Rule-based insight synthesis from a profiling summary.
//!
//! The ladder runs in a fixed order and each rule contributes at most one
//! insight:
//!
//! 1. top performer (bar)
//! 2. strongest correlation, or an exploratory pair (scatter)
//! 3. volatility of the first profiled distribution (area)
//! 4. panorama of a secondary metric (line)
//!
//! Overview insights pad the list up to the configured maximum while a
//! numeric column is available.

use tracing::debug;

use crate::chart::ChartType;
use crate::input::{format_number, Dataset};
use crate::schema::{
    display_name, AnalysisSummary, CorrelationPair, DistributionRecord, TopPerformerRecord,
};
use crate::stats;

use super::Insight;

/// Chart types cycled through by overview padding.
const PADDING_CHARTS: [ChartType; 4] = [
    ChartType::Bar,
    ChartType::Line,
    ChartType::Area,
    ChartType::Pie,
];

#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    /// Upper bound on insights per run.
    pub max_insights: usize,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self { max_insights: 4 }
    }
}

/// Produces ranked insights from an [`AnalysisSummary`] without any external
/// service.
pub struct InsightSynthesizer {
    config: SynthesizerConfig,
}

impl InsightSynthesizer {
    pub fn new() -> Self {
        Self {
            config: SynthesizerConfig::default(),
        }
    }

    pub fn with_config(config: SynthesizerConfig) -> Self {
        Self { config }
    }

    /// Run the rule ladder. Returns at most `max_insights` insights, most
    /// important first.
    pub fn synthesize(&self, dataset: &Dataset, summary: &AnalysisSummary) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(record) = &summary.top_performer {
            insights.push(top_performer_insight(record));
        }

        match summary.strongest_correlation() {
            Some(pair) => insights.push(correlation_insight(pair)),
            None => {
                if let Some(insight) = exploratory_insight(dataset, summary) {
                    insights.push(insight);
                }
            }
        }

        if let Some(record) = summary.distributions.first() {
            insights.push(volatility_insight(record, summary));
        }

        if let Some(insight) = panorama_insight(dataset, summary) {
            insights.push(insight);
        }

        self.pad(dataset, summary, &mut insights);

        insights.truncate(self.config.max_insights);
        insights
    }

    fn pad(&self, dataset: &Dataset, summary: &AnalysisSummary, insights: &mut Vec<Insight>) {
        let numeric = &summary.numeric_columns;
        while insights.len() < self.config.max_insights && !numeric.is_empty() {
            let index = insights.len();
            let column = &numeric[index % numeric.len()];

            let values = dataset.column(column).map(|c| c.numbers()).unwrap_or_default();
            let mean = match stats::mean(&values) {
                Ok(mean) => mean,
                Err(e) => {
                    debug!(column = %column, error = %e, "overview padding stopped");
                    break;
                }
            };

            let x = summary.first_categorical().unwrap_or(column.as_str());
            let name = display_name(column);
            insights.push(Insight::new(
                format!("📈 Overview of {}", name),
                PADDING_CHARTS[index % PADDING_CHARTS.len()],
                x,
                Some(column.as_str()),
                format!(
                    "A first look at {} with an average of {:.2}. A good starting point for spotting patterns.",
                    name, mean
                ),
            ));
        }
    }
}

impl Default for InsightSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

fn top_performer_insight(record: &TopPerformerRecord) -> Insight {
    let top = &record.top_group;
    let second = &record.second_group;
    let metric = display_name(&record.metric_column);
    let top_value = format_number(top.mean_value);
    let diff = record.percent_difference;

    let title = if diff > 100.0 {
        // The group means are rounded for display; a tiny runner-up rounds to 0.
        let ratio = diff / 100.0 + 1.0;
        format!("🏆 {} is {:.1}x the runner-up in {}", top.name, ratio, metric)
    } else if diff > 50.0 {
        format!("📈 {} leads with +{:.0}% in {}", top.name, diff, metric)
    } else {
        format!("🎯 {} leads in {} (avg. {})", top.name, metric, top_value)
    };

    let narrative = format!(
        "'{}' averages {} in {}, ahead of '{}' ({}) by {}%. The chart shows every group in its original order.",
        top.name,
        top_value,
        metric,
        second.name,
        format_number(second.mean_value),
        format_number(diff)
    );

    Insight::new(
        title,
        ChartType::Bar,
        &record.grouping_column,
        Some(record.metric_column.as_str()),
        narrative,
    )
}

fn correlation_insight(pair: &CorrelationPair) -> Insight {
    let a = display_name(&pair.column_a);
    let b = display_name(&pair.column_b);
    let r = format_number(pair.coefficient);
    let strength = pair.strength.label();
    let direction = pair.direction.label();

    let (title, recommendation) = if pair.coefficient.abs() > 0.7 {
        let emoji = if pair.coefficient > 0.0 { "🔗" } else { "⚡" };
        (
            format!("{} High {} correlation ({}) between {} and {}", emoji, direction, r, a, b),
            "Consider using one to predict the other.",
        )
    } else if pair.coefficient.abs() > 0.5 {
        (
            format!("📊 {} relationship between {} and {} (r={})", capitalize(strength), a, b, r),
            "This relationship deserves a deeper investigation.",
        )
    } else {
        (
            format!("📉 {} {} correlation: {} vs {}", capitalize(strength), direction, a, b),
            "The relationship exists but is subtle.",
        )
    };

    let narrative = format!(
        "A Pearson coefficient of {} indicates a {} {} correlation between these variables. {}",
        r, strength, direction, recommendation
    );

    Insight::new(
        title,
        ChartType::Scatter,
        &pair.column_a,
        Some(pair.column_b.as_str()),
        narrative,
    )
}

/// Used when no pair cleared the correlation threshold.
fn exploratory_insight(dataset: &Dataset, summary: &AnalysisSummary) -> Option<Insight> {
    let (a, b) = match summary.numeric_columns.as_slice() {
        [a, b, ..] => (a, b),
        _ => return None,
    };

    let cells = |name: &str| -> Vec<Option<f64>> {
        dataset
            .column(name)
            .map(|c| c.values.iter().map(|v| v.as_number()).collect())
            .unwrap_or_default()
    };

    let r = match stats::pearson(&cells(a), &cells(b)) {
        Ok(r) => r,
        Err(e) => {
            debug!(a = %a, b = %b, error = %e, "exploratory correlation skipped");
            return None;
        }
    };

    Some(Insight::new(
        format!(
            "📊 Exploring the relationship between {} and {}",
            display_name(a),
            display_name(b)
        ),
        ChartType::Scatter,
        a,
        Some(b.as_str()),
        format!(
            "With r={:.2}, there is no significant linear correlation. The data may follow a nonlinear relationship that needs further analysis.",
            r
        ),
    ))
}

fn volatility_insight(record: &DistributionRecord, summary: &AnalysisSummary) -> Insight {
    let column = display_name(&record.column);
    let cv = format_number(record.coefficient_of_variation);

    let (title, risk) = if record.coefficient_of_variation > 50.0 {
        (format!("⚠️ High variability in {} (CV={}%)", column, cv), "high")
    } else if record.coefficient_of_variation > 25.0 {
        (format!("📈 Moderate variability in {}", column), "moderate")
    } else {
        (format!("✅ {} shows consistent stability", column), "low")
    };

    let skew_remark = if record.mean != 0.0
        && (record.mean - record.median).abs() / record.mean > 0.1
    {
        format!(
            "The gap between mean ({}) and median ({}) points to a {} distribution. ",
            format_number(record.mean),
            format_number(record.median),
            record.skew_class.label()
        )
    } else {
        String::new()
    };

    let outlier_remark = if record.outlier_percent > 5.0 {
        format!(
            "{}% of values are outliers that may need investigation.",
            format_number(record.outlier_percent)
        )
    } else {
        "The data is consistent, with no significant outliers.".to_string()
    };

    let x = summary
        .first_categorical()
        .or_else(|| summary.first_numeric())
        .unwrap_or(record.column.as_str());

    Insight::new(
        title,
        ChartType::Area,
        x,
        Some(record.column.as_str()),
        format!(
            "{} shows {} variability (CV={}%). {}{}",
            column, risk, cv, skew_remark, outlier_remark
        ),
    )
}

/// Range overview of the second numeric column, grouped by the first
/// categorical one.
fn panorama_insight(dataset: &Dataset, summary: &AnalysisSummary) -> Option<Insight> {
    if summary.numeric_columns.len() < 2 {
        return None;
    }
    let category = summary.first_categorical()?;
    let metric = summary
        .numeric_columns
        .get(1)
        .or_else(|| summary.numeric_columns.first())?;

    let values = dataset.column(metric)?.numbers();
    let mean = match stats::mean(&values) {
        Ok(mean) => mean,
        Err(e) => {
            debug!(column = %metric, error = %e, "panorama skipped");
            return None;
        }
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let spread = if range / mean > 1.0 {
        "high diversity in the data"
    } else {
        "relative homogeneity"
    };

    let name = display_name(metric);
    Some(Insight::new(
        format!("📊 {} at a glance: from {:.0} to {:.0}", name, min, max),
        ChartType::Line,
        category,
        Some(metric.as_str()),
        format!(
            "{} values range between {:.2} and {:.2}, with a mean of {:.2}. This spread of {:.2} suggests {}.",
            name, min, max, mean, range, spread
        ),
    ))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{ColumnClassifier, StatisticalProfiler};
    use crate::input::Column;
    use crate::schema::{CorrelationDirection, CorrelationStrength, SkewClass};

    fn synthesize(dataset: &Dataset) -> Vec<Insight> {
        let profiles = ColumnClassifier::classify(dataset);
        let summary = StatisticalProfiler::new().profile(dataset, &profiles);
        InsightSynthesizer::new().synthesize(dataset, &summary)
    }

    fn sales() -> Dataset {
        Dataset::new(vec![
            Column::text(
                "store_region",
                [Some("North"), Some("South"), Some("North"), Some("East"), Some("South"), Some("East")],
            ),
            Column::numeric(
                "monthly_sales",
                [Some(100.0), Some(40.0), Some(300.0), Some(20.0), Some(60.0), Some(40.0)],
            ),
            Column::numeric(
                "units",
                [Some(10.0), Some(4.0), Some(29.0), Some(2.0), Some(7.0), Some(4.0)],
            ),
        ])
    }

    #[test]
    fn test_full_ladder_order() {
        let insights = synthesize(&sales());
        let charts: Vec<ChartType> = insights.iter().map(|i| i.chart_type).collect();

        assert_eq!(
            charts,
            vec![ChartType::Bar, ChartType::Scatter, ChartType::Area, ChartType::Line]
        );
    }

    #[test]
    fn test_top_performer_multiplier_title() {
        let insights = synthesize(&sales());
        let top = &insights[0];

        assert_eq!(top.title, "🏆 North is 4.0x the runner-up in Monthly Sales");
        assert_eq!(top.parameters.x, "store_region");
        assert_eq!(top.parameters.y.as_deref(), Some("monthly_sales"));
        assert!(top.narrative.contains("'North' averages 200 in Monthly Sales"));
        assert!(top.narrative.contains("by 300%"));
    }

    #[test]
    fn test_top_performer_title_tiers() {
        let record = |diff: f64| TopPerformerRecord {
            grouping_column: "g".into(),
            metric_column: "score".into(),
            top_group: crate::schema::GroupMean { name: "A".into(), mean_value: 12.5 },
            second_group: crate::schema::GroupMean { name: "B".into(), mean_value: 10.0 },
            percent_difference: diff,
            total_group_count: 2,
            shown_group_count: 2,
        };
        assert_eq!(top_performer_insight(&record(60.0)).title, "📈 A leads with +60% in Score");
        assert_eq!(top_performer_insight(&record(25.0)).title, "🎯 A leads in Score (avg. 12.5)");
    }

    #[test]
    fn test_strong_correlation_insight() {
        let insights = synthesize(&sales());
        let corr = &insights[1];
        assert!(corr.title.starts_with("🔗 High positive correlation (1)"));
        assert!(corr.narrative.ends_with("Consider using one to predict the other."));
        assert_eq!(corr.parameters.x, "monthly_sales");
        assert_eq!(corr.parameters.y.as_deref(), Some("units"));
    }

    #[test]
    fn test_exploratory_insight_without_qualifying_pair() {
        let dataset = Dataset::new(vec![
            Column::numeric("a", [Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            Column::numeric("b", [Some(1.0), Some(-1.0), Some(-1.0), Some(1.0)]),
        ]);
        let insights = synthesize(&dataset);
        let scatter = insights
            .iter()
            .find(|i| i.chart_type == ChartType::Scatter)
            .expect("exploratory insight");
        assert!(scatter.title.starts_with("📊 Exploring the relationship"));
        assert!(scatter.narrative.starts_with("With r=0.00"));
    }

    #[test]
    fn test_volatility_uses_first_categorical_axis() {
        let insights = synthesize(&sales());
        let area = &insights[2];
        assert_eq!(area.parameters.x, "store_region");
        assert_eq!(area.parameters.y.as_deref(), Some("monthly_sales"));
        assert!(area.title.starts_with("⚠️ High variability in Monthly Sales"));
    }

    #[test]
    fn test_stable_column_without_outliers() {
        let dataset = Dataset::new(vec![Column::numeric(
            "temp",
            [Some(19.0), Some(20.0), Some(21.0), Some(20.0), Some(20.5), Some(19.5)],
        )]);
        let insights = synthesize(&dataset);
        let area = insights.iter().find(|i| i.chart_type == ChartType::Area).unwrap();
        assert_eq!(area.title, "✅ Temp shows consistent stability");
        assert!(area.narrative.ends_with("no significant outliers."));
        assert_eq!(area.parameters.x, "temp");
    }

    #[test]
    fn test_padding_fills_to_four() {
        let dataset = Dataset::new(vec![Column::numeric(
            "score",
            [Some(1.0), Some(2.0), Some(3.0), Some(10.0)],
        )]);
        let insights = synthesize(&dataset);
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].chart_type, ChartType::Area);
        assert_eq!(insights[1].title, "📈 Overview of Score");
        assert_eq!(insights[1].chart_type, ChartType::Line);
        assert_eq!(insights[2].chart_type, ChartType::Area);
        assert_eq!(insights[3].chart_type, ChartType::Pie);
    }

    #[test]
    fn test_no_numeric_columns_no_padding() {
        let dataset = Dataset::new(vec![Column::text("name", [Some("a"), Some("b")])]);
        assert!(synthesize(&dataset).is_empty());
    }

    #[test]
    fn test_respects_configured_maximum() {
        let dataset = sales();
        let profiles = ColumnClassifier::classify(&dataset);
        let summary = StatisticalProfiler::new().profile(&dataset, &profiles);
        let synthesizer = InsightSynthesizer::with_config(SynthesizerConfig { max_insights: 2 });
        assert_eq!(synthesizer.synthesize(&dataset, &summary).len(), 2);
    }

    #[test]
    fn test_multiplier_title_with_tiny_runner_up() {
        let dataset = Dataset::new(vec![
            Column::text("g", [Some("a"), Some("b")]),
            Column::numeric("v", [Some(5.0), Some(0.004)]),
        ]);
        let insights = synthesize(&dataset);
        let top = &insights[0];

        assert!(!top.title.contains("inf"));
        assert_eq!(top.title, "🏆 a is 1250.0x the runner-up in V");
    }

    fn distribution(mean: f64, median: f64, cv: f64, outliers: f64) -> DistributionRecord {
        DistributionRecord {
            column: "score".into(),
            mean,
            median,
            std_dev: 1.0,
            coefficient_of_variation: cv,
            outlier_percent: outliers,
            skew_class: SkewClass::PositiveSkew,
        }
    }

    fn pair(coefficient: f64, strength: CorrelationStrength) -> CorrelationPair {
        CorrelationPair {
            column_a: "a".into(),
            column_b: "b".into(),
            coefficient,
            strength,
            direction: if coefficient > 0.0 {
                CorrelationDirection::Positive
            } else {
                CorrelationDirection::Negative
            },
        }
    }

    #[test]
    fn test_skew_remark_when_mean_and_median_diverge() {
        let summary = AnalysisSummary::default();
        let insight = volatility_insight(&distribution(10.0, 8.0, 10.0, 0.0), &summary);
        assert!(insight.narrative.contains(
            "The gap between mean (10) and median (8) points to a positively skewed distribution."
        ));

        let insight = volatility_insight(&distribution(10.0, 9.5, 10.0, 0.0), &summary);
        assert!(!insight.narrative.contains("The gap"));
    }

    #[test]
    fn test_no_skew_remark_for_negative_mean() {
        let summary = AnalysisSummary::default();
        let insight = volatility_insight(&distribution(-5.0, -1.0, 10.0, 0.0), &summary);
        assert!(!insight.narrative.contains("The gap"));
    }

    #[test]
    fn test_outlier_callout() {
        let summary = AnalysisSummary::default();
        let insight = volatility_insight(&distribution(10.0, 10.0, 10.0, 12.5), &summary);
        assert!(insight
            .narrative
            .ends_with("12.5% of values are outliers that may need investigation."));

        let insight = volatility_insight(&distribution(10.0, 10.0, 10.0, 5.0), &summary);
        assert!(insight.narrative.ends_with("no significant outliers."));
    }

    #[test]
    fn test_moderate_volatility_tier() {
        let summary = AnalysisSummary::default();
        let insight = volatility_insight(&distribution(10.0, 10.0, 30.0, 0.0), &summary);
        assert_eq!(insight.title, "📈 Moderate variability in Score");
        assert!(insight.narrative.starts_with("Score shows moderate variability (CV=30%)."));
        assert_eq!(insight.parameters.x, "score");
    }

    #[test]
    fn test_moderate_correlation_branch() {
        let insight = correlation_insight(&pair(0.62, CorrelationStrength::Moderate));
        assert_eq!(insight.title, "📊 Moderate relationship between A and B (r=0.62)");
        assert!(insight
            .narrative
            .ends_with("This relationship deserves a deeper investigation."));
    }

    #[test]
    fn test_weak_correlation_branch() {
        let insight = correlation_insight(&pair(-0.42, CorrelationStrength::Weak));
        assert_eq!(insight.title, "📉 Weak negative correlation: A vs B");
        assert!(insight
            .narrative
            .starts_with("A Pearson coefficient of -0.42 indicates a weak negative correlation"));
        assert!(insight.narrative.ends_with("The relationship exists but is subtle."));
    }

    fn panorama_for(values: [Option<f64>; 2]) -> Insight {
        let dataset = Dataset::new(vec![
            Column::text("g", [Some("x"), Some("y")]),
            Column::numeric("a", [Some(1.0), Some(2.0)]),
            Column::numeric("b", values),
        ]);
        let summary = AnalysisSummary {
            numeric_columns: vec!["a".into(), "b".into()],
            categorical_columns: vec!["g".into()],
            ..Default::default()
        };
        panorama_insight(&dataset, &summary).expect("panorama")
    }

    #[test]
    fn test_panorama_diverse_data() {
        let insight = panorama_for([Some(1.0), Some(10.0)]);
        assert_eq!(insight.title, "📊 B at a glance: from 1 to 10");
        assert_eq!(insight.chart_type, ChartType::Line);
        assert_eq!(insight.parameters.x, "g");
        assert!(insight.narrative.ends_with("suggests high diversity in the data."));
    }

    #[test]
    fn test_panorama_homogeneous_data() {
        let insight = panorama_for([Some(10.0), Some(12.0)]);
        assert!(insight.narrative.ends_with("suggests relative homogeneity."));
    }

    #[test]
    fn test_padding_stops_at_column_without_values() {
        let dataset = Dataset::new(vec![
            Column::numeric("score", [Some(1.0), Some(2.0), Some(3.0)]),
            Column::numeric("empty", [None, None, None]),
        ]);
        let summary = AnalysisSummary {
            numeric_columns: vec!["score".into(), "empty".into()],
            ..Default::default()
        };
        let insights = InsightSynthesizer::new().synthesize(&dataset, &summary);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "📈 Overview of Score");
        assert_eq!(insights[0].chart_type, ChartType::Bar);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("moderate"), "Moderate");
        assert_eq!(capitalize(""), "");
    }
}
